/// Reserved phrases with a fixed navigation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    Home,
}

const HOME_PHRASES: [&str; 3] = ["home", "main page", "go back"];

impl SpecialCommand {
    /// Case-insensitive substring check against the reserved phrases.
    #[must_use]
    pub fn detect(query: &str) -> Option<Self> {
        let lowered = query.to_lowercase();
        HOME_PHRASES
            .iter()
            .any(|phrase| lowered.contains(phrase))
            .then_some(Self::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_home_phrases() {
        for query in ["take me home", "Go Back please", "show the MAIN PAGE", "homepage"] {
            assert_eq!(SpecialCommand::detect(query), Some(SpecialCommand::Home), "{query}");
        }
    }

    #[test]
    fn ignores_other_queries() {
        assert_eq!(SpecialCommand::detect("I need a plumber"), None);
        assert_eq!(SpecialCommand::detect("going backwards"), None);
    }
}
