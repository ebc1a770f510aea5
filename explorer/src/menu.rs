//! Main menu text and selection parsing.

/// Menu shown before every selection
pub const MAIN_MENU: &str = "Please select what you want to find out :\n\
                             \t1. Similarity between terms\n\
                             \n\
                             \t2. Most similar word to a term\n\
                             \t3. Operations/analogies on vectors\n\
                             \t4. Which doesn't belong?\n\
                             \t5. End program\n";

/// Selection that ends the session
pub const MENU_STOP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Similarity,
    MostSimilar,
    Analogy,
    OddOneOut,
    End,
}

impl MenuChoice {
    /// Parse a typed selection; anything outside 1..=5 is `None`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(Self::Similarity),
            2 => Some(Self::MostSimilar),
            3 => Some(Self::Analogy),
            4 => Some(Self::OddOneOut),
            MENU_STOP => Some(Self::End),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::Similarity => 1,
            Self::MostSimilar => 2,
            Self::Analogy => 3,
            Self::OddOneOut => 4,
            Self::End => MENU_STOP,
        }
    }
}
