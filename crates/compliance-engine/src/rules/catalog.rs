//! Rule table and the per-kind rule sets built from it

use super::{metadata, text, Messages, Rule};

pub const TITLE_PRESENT: Rule = Rule {
    id: "title_present",
    predicate: metadata::has_meaningful_title,
    evidence: metadata::title,
    messages: Messages {
        en: "Document must have a meaningful title.",
        de: "Dokument muss einen sinnvollen Titel haben.",
    },
};

pub const IDENTIFICATION_NUMBER: Rule = Rule {
    id: "identification_number",
    predicate: text::has_identification_number,
    evidence: text::identification_numbers,
    messages: Messages {
        en: "Document must follow identification numbering patterns.",
        de: "Dokument muss Identifikationsnummerierungsrichtlinien folgen.",
    },
};

pub const PAGE_NUMBERS_CORRECT: Rule = Rule {
    id: "page_numbers_correct",
    predicate: text::has_page_numbers,
    evidence: text::page_number_status,
    messages: Messages {
        en: "Each page should include page numbers.",
        de: "Jede Seite sollte Seitenzahlen enthalten.",
    },
};

pub const REVISION_STATUS: Rule = Rule {
    id: "revision_status",
    predicate: text::has_revision_status,
    evidence: text::revision_markers,
    messages: Messages {
        en: "Document must indicate a revision status.",
        de: "Dokument muss einen Versionsstatus angeben.",
    },
};

pub const AUTHOR_VERIFIED: Rule = Rule {
    id: "author_verified",
    predicate: metadata::has_author,
    evidence: metadata::author,
    messages: Messages {
        en: "Document must specify an author.",
        de: "Dokument muss einen Autor angeben.",
    },
};

pub const APPROVAL_VERIFIED: Rule = Rule {
    id: "approval_verified",
    predicate: text::has_approval,
    evidence: text::approval_markers,
    messages: Messages {
        en: "Approval markers must be present.",
        de: "Genehmigungsmarker müssen vorhanden sein.",
    },
};

pub const EFFECTIVE_DATE: Rule = Rule {
    id: "effective_date",
    predicate: text::has_effective_date,
    evidence: text::effective_dates,
    messages: Messages {
        en: "Document must include an effective date.",
        de: "Dokument muss ein Gültigkeitsdatum enthalten.",
    },
};

pub const OWNERSHIP_NOTICE: Rule = Rule {
    id: "ownership_notice",
    predicate: text::has_ownership_notice,
    evidence: text::ownership_notices,
    messages: Messages {
        en: "Ownership notices must be included.",
        de: "Eigentumshinweise müssen enthalten sein.",
    },
};

pub const CREATING_UNIT: Rule = Rule {
    id: "creating_unit",
    predicate: text::has_creating_unit,
    evidence: text::creating_units,
    messages: Messages {
        en: "Creating unit must be mentioned.",
        de: "Erstellende Einheit muss erwähnt werden.",
    },
};

pub const CONFIDENTIALITY_LEVEL: Rule = Rule {
    id: "confidentiality_level",
    predicate: text::has_confidentiality_level,
    evidence: text::confidentiality_level,
    messages: Messages {
        en: "Confidentiality level must be indicated.",
        de: "Vertraulichkeitsstufe muss angegeben werden.",
    },
};

// Same predicate as IDENTIFICATION_NUMBER; kept as its own rule.
pub const DOCUMENT_NUMBERING: Rule = Rule {
    id: "document_numbering",
    predicate: text::has_identification_number,
    evidence: text::numbering_shapes,
    messages: Messages {
        en: "Document must follow numbering conventions.",
        de: "Dokument muss Nummerierungskonventionen folgen.",
    },
};

pub const TEMPLATE_COMPLIANCE: Rule = Rule {
    id: "template_compliance",
    predicate: metadata::follows_template,
    evidence: metadata::template_status,
    messages: Messages {
        en: "Document must comply with the template.",
        de: "Dokument muss dem Template entsprechen.",
    },
};

pub const AMS_COMPLIANCE: Rule = Rule {
    id: "ams_compliance",
    predicate: text::has_ams_reference,
    evidence: text::ams_references,
    messages: Messages {
        en: "Document must comply with AMS.",
        de: "Dokument muss AMS entsprechen.",
    },
};

pub const PAGE_COUNT: Rule = Rule {
    id: "page_count",
    predicate: metadata::has_pages,
    evidence: metadata::page_count,
    messages: Messages {
        en: "PDF must have pages.",
        de: "PDF muss Seiten haben.",
    },
};

pub const ROWS_PRESENT: Rule = Rule {
    id: "rows_present",
    predicate: metadata::has_rows,
    evidence: metadata::row_count,
    messages: Messages {
        en: "Excel file must have rows.",
        de: "Excel-Datei muss Zeilen enthalten.",
    },
};

pub const COLUMNS_PRESENT: Rule = Rule {
    id: "columns_present",
    predicate: metadata::has_columns,
    evidence: metadata::column_count,
    messages: Messages {
        en: "Excel file must have columns.",
        de: "Excel-Datei muss Spalten enthalten.",
    },
};

pub const WORD_DOCUMENT_RULES: &[Rule] = &[
    TITLE_PRESENT,
    IDENTIFICATION_NUMBER,
    PAGE_NUMBERS_CORRECT,
    REVISION_STATUS,
    AUTHOR_VERIFIED,
    APPROVAL_VERIFIED,
    EFFECTIVE_DATE,
    OWNERSHIP_NOTICE,
    CREATING_UNIT,
    CONFIDENTIALITY_LEVEL,
    DOCUMENT_NUMBERING,
    TEMPLATE_COMPLIANCE,
    AMS_COMPLIANCE,
];

pub const PDF_RULES: &[Rule] = &[
    PAGE_COUNT,
    IDENTIFICATION_NUMBER,
    REVISION_STATUS,
    APPROVAL_VERIFIED,
    EFFECTIVE_DATE,
    OWNERSHIP_NOTICE,
    CREATING_UNIT,
    CONFIDENTIALITY_LEVEL,
    DOCUMENT_NUMBERING,
    AMS_COMPLIANCE,
];

pub const SPREADSHEET_RULES: &[Rule] = &[
    ROWS_PRESENT,
    COLUMNS_PRESENT,
    CONFIDENTIALITY_LEVEL,
    OWNERSHIP_NOTICE,
    CREATING_UNIT,
];
