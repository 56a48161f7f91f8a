pub mod assessment_type;
pub mod question;
pub mod response;
pub mod risk;
