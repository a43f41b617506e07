//! Weekday and month names for the supported locales

use chrono::Weekday;

/// Display language for dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
    Es,
}

impl Locale {
    /// Abbreviated weekday name, e.g. "Sun".
    pub fn weekday_abbrev(self, weekday: Weekday) -> &'static str {
        let names: [&str; 7] = match self {
            Locale::En => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            Locale::De => ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"],
            Locale::Fr => ["lun.", "mar.", "mer.", "jeu.", "ven.", "sam.", "dim."],
            Locale::Es => ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"],
        };
        names[weekday.num_days_from_monday() as usize]
    }

    /// Abbreviated month name for a zero-based month.
    pub fn month_abbrev(self, month0: u32) -> &'static str {
        let names: [&str; 12] = match self {
            Locale::En => [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            Locale::De => [
                "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
            ],
            Locale::Fr => [
                "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.",
                "nov.", "déc.",
            ],
            Locale::Es => [
                "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
            ],
        };
        names.get(month0 as usize).copied().unwrap_or("")
    }
}
