use crate::workflows::refurbishment::domain::Milestone;

/// What a sheet column feeds, in the fixed column order of the tracking sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    UnitNumber,
    Court,
    Bedrooms,
    Area,
    Date(Milestone),
    SatisfactionStatus,
    Comment,
}

pub(crate) const COLUMN_COUNT: usize = 4 + 14 + 2;

pub(crate) fn layout() -> [Column; COLUMN_COUNT] {
    let m = Milestone::ordered();
    [
        Column::UnitNumber,
        Column::Court,
        Column::Bedrooms,
        Column::Area,
        Column::Date(m[0]),
        Column::Date(m[1]),
        Column::Date(m[2]),
        Column::Date(m[3]),
        Column::Date(m[4]),
        Column::Date(m[5]),
        Column::Date(m[6]),
        Column::Date(m[7]),
        Column::Date(m[8]),
        Column::Date(m[9]),
        Column::Date(m[10]),
        Column::Date(m[11]),
        Column::Date(m[12]),
        Column::Date(m[13]),
        Column::SatisfactionStatus,
        Column::Comment,
    ]
}

impl Column {
    /// Field name reported in validation errors.
    pub fn field(self) -> &'static str {
        match self {
            Column::UnitNumber => "unitNumber",
            Column::Court => "court",
            Column::Bedrooms => "bedrooms",
            Column::Area => "area",
            Column::Date(milestone) => milestone.field(),
            Column::SatisfactionStatus => "satisfactionStatus",
            Column::Comment => "comment",
        }
    }

    /// Header text of the import template.
    pub fn header(self) -> &'static str {
        match self {
            Column::UnitNumber => "House No.",
            Column::Court => "Court",
            Column::Bedrooms => "BR No.",
            Column::Area => "Area (m2)",
            Column::Date(milestone) => milestone.label(),
            Column::SatisfactionStatus => "Housing Services Satisfaction Status",
            Column::Comment => "Comment",
        }
    }
}

/// Template header row, useful for producing an empty sheet.
pub fn template_headers() -> Vec<&'static str> {
    layout().iter().map(|column| column.header()).collect()
}
