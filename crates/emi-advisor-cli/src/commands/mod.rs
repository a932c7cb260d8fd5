pub mod advise;
pub mod assess;
pub mod emi;
pub mod options;
