//! Known column spellings per dataset.
//!
//! Government datasets rename columns without versioning. Add a new spelling here rather
//! than special-casing it at a call site; order is preference order.

use crate::record::FieldVariants;

pub mod registry {
	use super::FieldVariants;

	pub const COMPANY_ID: FieldVariants = &["מספר חברה", "מספר_חברה", "מספר תאגיד", "company_number"];
	pub const NAME: FieldVariants = &["שם חברה", "שם_חברה", "שם תאגיד", "company_name"];
	pub const ENGLISH_NAME: FieldVariants = &["שם באנגלית", "שם_באנגלית", "english_name"];
	pub const STATUS: FieldVariants = &["סטטוס חברה", "סטטוס_חברה", "status"];
	pub const COMPANY_TYPE: FieldVariants = &["סוג תאגיד", "סוג_תאגיד", "corporation_type"];
	pub const CITY: FieldVariants = &["שם עיר", "שם_עיר", "city"];
}

pub mod changes {
	use super::FieldVariants;

	pub const COMPANY_NUMBER: FieldVariants = &[
		"מספר תאגיד",
		"מספר_תאגיד",
		"מספר_חברה",
		"מספר חברה",
		"מס_חברה",
		"מס חברה",
		"company_number",
		"corporation_number",
		"_id",
	];
	pub const DATE: FieldVariants = &[
		"תאריך עדכון סטטוס",
		"תאריך_עדכון_סטטוס",
		"תאריך_שינוי",
		"תאריך שינוי",
		"שינוי_בתאריך",
		"שינוי בתאריך",
		"תאריך",
		"date",
	];
	pub const TYPE: FieldVariants =
		&["סוג בקשה", "סוג_בקשה", "סוג_שינוי", "סוג שינוי", "סוג", "type"];
	pub const COMPANY_NAME: FieldVariants = &["שם תאגיד", "שם_תאגיד", "שם חברה", "שם_חברה"];
	pub const REQUEST_CODE: FieldVariants = &["קוד סוג בקשה", "קוד_סוג_בקשה"];
	pub const SECURITY_ID: FieldVariants = &["מזהה השיעבוד", "מזהה_השיעבוד"];
}

/// Office holders appear under several titles depending on the proceeding type.
pub mod office_holder {
	use super::FieldVariants;

	pub const NAME: FieldVariants = &[
		"שם בעל התפקיד",
		"שם בעל תפקיד",
		"בעל תפקיד",
		"שם המפרק",
		"שם הנאמן",
		"שם כונס הנכסים",
	];
	pub const PHONE: FieldVariants = &["טלפון בעל התפקיד", "טלפון בעל תפקיד", "טלפון"];
	pub const EMAIL: FieldVariants = &["דואר אלקטרוני בעל התפקיד", "דוא\"ל", "דואר אלקטרוני"];
	pub const APPOINTMENT_DATE: FieldVariants = &["תאריך מינוי בעל התפקיד", "תאריך מינוי"];
	pub const STATUS: FieldVariants = &["סטטוס בעל התפקיד", "סטטוס מינוי"];
}

/// Companies under winding-up. The only insolvency dataset carrying the company number.
pub mod liquidation {
	use super::FieldVariants;

	pub const COMPANY_ID: FieldVariants = &["מספר זיהוי של החברה", "מספר זיהוי החברה"];
	pub const COMPANY_NAME: FieldVariants = &["שם החברה", "שם חברה"];
	pub const FILE_ID: FieldVariants = &["מזהה תיק פירוק חברה", "מזהה תיק"];
	pub const OPENING_DATE: FieldVariants = &["תאריך קבלת צו פירוק", "תאריך הגשת הבקשה"];
	pub const CLOSING_DATE: FieldVariants = &["תאריך סגירת תיק"];
	pub const STATUS: FieldVariants = &["סטטוס תיק"];
}

pub mod bankruptcy {
	use super::FieldVariants;

	pub const FILE_ID: FieldVariants = &["מספר רץ תיקים", "מזהה תיק"];
	pub const OPENING_DATE: FieldVariants = &["תאריך פתיחת תיק"];
	pub const CLOSING_DATE: FieldVariants = &["תאריך גזירת תיק", "תאריך סגירת תיק"];
	pub const STATUS: FieldVariants = &["סטטוס תיק"];
}

pub mod claims {
	use super::FieldVariants;

	pub const FILE_ID: FieldVariants = &["מזהה תיק", "מספר רץ תיקים"];
	pub const STATUS: FieldVariants = &["סטטוס תביעת חוב"];
	pub const CLAIMANT: FieldVariants = &["שם תובע החוב", "שם התובע"];
	pub const CLAIMANT_TYPE: FieldVariants = &["סוג תובע החוב"];
	pub const SYSTEM_TYPE: FieldVariants = &["סוג מערכת"];
	pub const DEBT_CREATION_DATE: FieldVariants = &["תאריך יצירת החוב"];
	pub const AMOUNT: FieldVariants = &["סכום תביעת החוב"];
	pub const APPROVED_AMOUNT: FieldVariants = &["סכום שאושר"];
	pub const APPROVED_REGULAR_AMOUNT: FieldVariants = &["סכום שאושר כתביעת חוב רגילה"];
	pub const APPROVED_PRIORITY_AMOUNT: FieldVariants = &["סכום שאושר בדין קדימה"];
}

/// Justice ministry insolvency API. Casing differs between API revisions.
pub mod insolvency {
	use super::FieldVariants;

	pub const PROCEEDING_ID: FieldVariants =
		&["ProceedingId", "proceedingId", "proceeding_id", "id", "_id"];
	pub const DEBTOR_NAME: FieldVariants = &["DebtorName", "debtorName", "debtor_name"];
	pub const STATUS: FieldVariants = &["Status", "status", "ProceedingStatus", "proceedingStatus"];
	pub const TYPE: FieldVariants = &["Type", "type", "ProceedingType", "proceedingType"];
	pub const OPENING_DATE: FieldVariants =
		&["OpeningDate", "openingDate", "opening_date", "dateOpened"];
	pub const COURT_FILE_NUMBER: FieldVariants =
		&["CourtFileNumber", "courtFileNumber", "court_file_number"];
	pub const ORDERS: FieldVariants = &["Orders", "orders", "ordersList"];
	pub const TRUSTEES: FieldVariants = &["Trustees", "trustees", "trusteesList"];

	pub const ORDER_TYPE: FieldVariants = &["OrderType", "orderType", "type"];
	pub const ORDER_DATE: FieldVariants = &["OrderDate", "orderDate", "date"];
	pub const ORDER_DETAILS: FieldVariants = &["Details", "details"];

	pub const TRUSTEE_NAME: FieldVariants = &["Name", "name", "TrusteeName", "trusteeName"];
	pub const TRUSTEE_APPOINTMENT_DATE: FieldVariants =
		&["AppointmentDate", "appointmentDate", "date"];
}
