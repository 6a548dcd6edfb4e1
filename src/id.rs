//! Code for handling string identifiers (port codes and vessel class names).

/// Define a new reference-counted string identifier type
macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone, std::hash::Hash, PartialEq, Eq, PartialOrd, Ord, Debug, serde::Deserialize,
            serde::Serialize,
        )]
        #[serde(transparent)]
        /// An identifier of this type
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Get the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}
pub(crate) use define_id_type;

#[cfg(test)]
mod tests {
    use indexmap::IndexSet;

    define_id_type! {TestID}

    #[test]
    fn id_borrows_as_str() {
        let ids: IndexSet<TestID> = ["DEBRV".into(), "SEGOT".into()].into_iter().collect();
        assert_eq!(ids.get("SEGOT").unwrap().as_str(), "SEGOT");
        assert!(!ids.contains("PLGDY"));
    }

    #[test]
    fn id_display_matches_str() {
        let id = TestID::from("DKAAR");
        assert_eq!(id.to_string(), "DKAAR");
        assert_eq!(id, TestID::from(String::from("DKAAR")));
    }
}
