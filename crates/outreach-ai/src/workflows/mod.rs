pub mod campaigns;
pub mod leads;
