use std::borrow::Cow;

/// Clubs listed in the "Top Teams" panel.
pub const TOP_TEAMS: [&str; 9] = [
    "Arsenal",
    "Manchester City",
    "Manchester United",
    "Chelsea",
    "Liverpool",
    "Tottenham",
    "Leicester City",
    "Everton",
    "Aston Villa",
];

const SHORT_NAMES: [(&str, &str); 6] = [
    ("Brighton and Hove Albion", "Brighton"),
    ("Manchester United", "Manchester Utd"),
    ("Newcastle United", "Newcastle Utd"),
    ("Tottenham Hotspur", "Tottenham"),
    ("West Ham United", "West Ham"),
    ("Wolverhampton Wanderers", "Wolves"),
];

/// Map a full club name to the short form used by the match data set.
/// Names without a short form pass through untouched.
pub fn normalize_team_name(name: &str) -> Cow<'_, str> {
    let trimmed = name.trim();
    SHORT_NAMES
        .iter()
        .find(|(long, _)| *long == trimmed)
        .map(|(_, short)| Cow::Borrowed(*short))
        .unwrap_or(Cow::Borrowed(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_are_shortened() {
        assert_eq!(normalize_team_name("Wolverhampton Wanderers"), "Wolves");
        assert_eq!(normalize_team_name("Manchester United"), "Manchester Utd");
        assert_eq!(normalize_team_name(" Tottenham Hotspur "), "Tottenham");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(normalize_team_name("Arsenal"), "Arsenal");
        assert_eq!(normalize_team_name("Manchester City"), "Manchester City");
    }
}
