//! Bundled offline quotes and category labels

use rand::Rng;

use super::types::Quote;

/// Quotes shown when the remote source cannot be reached
pub const FALLBACK_QUOTES: [(&str, &str); 10] = [
    ("Every moment is a fresh beginning.", "T.S. Eliot"),
    ("In the middle of difficulty lies opportunity.", "Albert Einstein"),
    ("It does not matter how slowly you go as long as you do not stop.", "Confucius"),
    ("Life is what happens when you're busy making other plans.", "John Lennon"),
    ("The only way to do great work is to love what you do.", "Steve Jobs"),
    ("Simplicity is the ultimate sophistication.", "Leonardo da Vinci"),
    ("Be yourself; everyone else is already taken.", "Oscar Wilde"),
    ("Imagination is more important than knowledge.", "Albert Einstein"),
    ("The journey of a thousand miles begins with a single step.", "Lao Tzu"),
    ("What we think, we become.", "Buddha"),
];

/// Decorative labels attached to each displayed quote
pub const CATEGORIES: [&str; 8] = [
    "wisdom",
    "inspiration",
    "life",
    "philosophy",
    "courage",
    "perseverance",
    "mindfulness",
    "creativity",
];

/// Pick a fallback quote uniformly at random
pub fn random_fallback<R: Rng + ?Sized>(rng: &mut R) -> Quote {
    let (text, author) = FALLBACK_QUOTES[rng.random_range(0..FALLBACK_QUOTES.len())];
    Quote::new(text, author)
}

/// Pick a category label uniformly at random
pub fn random_category<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CATEGORIES[rng.random_range(0..CATEGORIES.len())]
}

/// Whether a quote is one of the bundled fallbacks
pub fn is_fallback(quote: &Quote) -> bool {
    FALLBACK_QUOTES
        .iter()
        .any(|(text, author)| quote.text == *text && quote.author == *author)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_fallback_is_member() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(is_fallback(&random_fallback(&mut rng)));
        }
    }

    #[test]
    fn test_random_fallback_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<_> = (0..500).map(|_| random_fallback(&mut rng).text).collect();
        assert_eq!(seen.len(), FALLBACK_QUOTES.len());
    }

    #[test]
    fn test_random_category_is_member() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert!(CATEGORIES.contains(&random_category(&mut rng)));
        }
    }

    #[test]
    fn test_is_fallback_rejects_other_author() {
        assert!(!is_fallback(&Quote::new("What we think, we become.", "Someone Else")));
    }
}
