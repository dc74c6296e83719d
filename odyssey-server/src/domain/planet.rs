//! Planet name types.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid planet name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid planet name: {reason}")]
pub struct InvalidPlanet {
    reason: &'static str,
}

/// A non-empty planet name.
///
/// Planets are identified by name alone in catalogue data. This type
/// guarantees the name is non-empty with no surrounding whitespace, and is
/// cheap to clone (the name is shared, not copied) so search code can key
/// adjacency maps and visited sets by planet without allocating.
///
/// Ordering is lexicographic on the name, which is what route enumeration
/// uses to make its output deterministic.
///
/// # Examples
///
/// ```
/// use odyssey_server::domain::Planet;
///
/// let earth = Planet::new("Earth").unwrap();
/// assert_eq!(earth.as_str(), "Earth");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(Planet::new("  Mars ").unwrap().as_str(), "Mars");
///
/// // Empty and blank names are rejected
/// assert!(Planet::new("").is_err());
/// assert!(Planet::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Planet(Arc<str>);

impl Planet {
    /// Parse a planet name, trimming surrounding whitespace.
    pub fn new(name: &str) -> Result<Self, InvalidPlanet> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(InvalidPlanet {
                reason: "name must not be empty",
            });
        }
        Ok(Planet(Arc::from(trimmed)))
    }

    /// Returns the planet name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Planet({})", self.as_str())
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_names() {
        assert!(Planet::new("Earth").is_ok());
        assert!(Planet::new("Mars").is_ok());
        assert!(Planet::new("Proxima Centauri b").is_ok());
    }

    #[test]
    fn reject_empty_and_blank() {
        assert!(Planet::new("").is_err());
        assert!(Planet::new(" ").is_err());
        assert!(Planet::new("\t\n").is_err());
    }

    #[test]
    fn trims_whitespace() {
        let p = Planet::new("  Jupiter  ").unwrap();
        assert_eq!(p.as_str(), "Jupiter");
    }

    #[test]
    fn display() {
        let p = Planet::new("Venus").unwrap();
        assert_eq!(format!("{}", p), "Venus");
    }

    #[test]
    fn debug() {
        let p = Planet::new("Uranus").unwrap();
        assert_eq!(format!("{:?}", p), "Planet(Uranus)");
    }

    #[test]
    fn equality() {
        let a = Planet::new("Earth").unwrap();
        let b = Planet::new("Earth").unwrap();
        let c = Planet::new("Mars").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_is_case_sensitive() {
        let a = Planet::new("Earth").unwrap();
        let b = Planet::new("earth").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let earth = Planet::new("Earth").unwrap();
        let jupiter = Planet::new("Jupiter").unwrap();
        let mars = Planet::new("Mars").unwrap();

        let mut planets = vec![mars.clone(), earth.clone(), jupiter.clone()];
        planets.sort();
        assert_eq!(planets, vec![earth, jupiter, mars]);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Planet::new("Earth").unwrap());
        assert!(set.contains(&Planet::new("Earth").unwrap()));
        assert!(!set.contains(&Planet::new("Mars").unwrap()));
    }

    #[test]
    fn clone_is_cheap_and_equal() {
        let a = Planet::new("Neptune").unwrap();
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), b.as_str());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for names that survive trimming: at least one non-space char.
    fn printable_name() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Za-z][A-Za-z0-9 -]{0,30}").unwrap()
    }

    proptest! {
        /// Any name with a leading letter parses
        #[test]
        fn printable_always_parses(s in printable_name()) {
            prop_assert!(Planet::new(&s).is_ok());
        }

        /// Parsing is idempotent: parsing the parsed name changes nothing
        #[test]
        fn parse_idempotent(s in printable_name()) {
            let once = Planet::new(&s).unwrap();
            let twice = Planet::new(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Whitespace-only strings are always rejected
        #[test]
        fn blank_rejected(s in "[ \t\r\n]{0,10}") {
            prop_assert!(Planet::new(&s).is_err());
        }

        /// Ordering agrees with string ordering of the names
        #[test]
        fn ordering_matches_str(a in printable_name(), b in printable_name()) {
            let pa = Planet::new(&a).unwrap();
            let pb = Planet::new(&b).unwrap();
            prop_assert_eq!(pa.cmp(&pb), pa.as_str().cmp(pb.as_str()));
        }
    }
}
