pub mod assemble;
pub mod dates;
pub mod entities;
pub mod fields;
pub mod record;

pub use assemble::{ClaimsTotals, ProcedureCounts, TrusteeData, assemble};
pub use entities::{
	ChangeRecord, CompanySummary, InsolvencyCase, InsolvencyCases, LegalProcedure, Order,
	ProcedureType, TrusteeInfo, TrusteeRef,
};
pub use record::{ExternalRecord, FieldVariants};
