use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tag the questionnaire uses to mean "none of these apply"
pub const NONE_SENTINEL: &str = "none";

/// Answer to a multi-select question that offers an explicit "none" option.
///
/// An absent or empty list is `Unanswered`. A list containing the "none"
/// tag is `NoneApplicable`, whatever else it holds. Chosen tags are
/// deduplicated, first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Unanswered,
    NoneApplicable,
    Chosen(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Unanswered
    }
}

impl<T: From<String> + PartialEq> Selection<T> {
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chosen: Vec<T> = Vec::new();
        let mut saw_any = false;
        for tag in tags {
            let tag = tag.into();
            saw_any = true;
            if tag == NONE_SENTINEL {
                return Selection::NoneApplicable;
            }
            let answer = T::from(tag);
            if !chosen.contains(&answer) {
                chosen.push(answer);
            }
        }

        if saw_any {
            Selection::Chosen(chosen)
        } else {
            Selection::Unanswered
        }
    }
}

impl<T> Selection<T> {
    /// Tags actually chosen; empty for the two non-choice states
    pub fn chosen(&self) -> &[T] {
        match self {
            Selection::Chosen(tags) => tags,
            _ => &[],
        }
    }

    /// True when the respondent picked no scorable tag at all
    pub fn is_empty(&self) -> bool {
        self.chosen().is_empty()
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: From<String> + PartialEq,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tags = Option::<Vec<String>>::deserialize(deserializer)?;
        Ok(Selection::from_tags(tags.unwrap_or_default()))
    }
}

impl<T: AsRef<str>> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::Unanswered => serializer.collect_seq(std::iter::empty::<&str>()),
            Selection::NoneApplicable => serializer.collect_seq([NONE_SENTINEL]),
            Selection::Chosen(tags) => serializer.collect_seq(tags.iter().map(|t| t.as_ref())),
        }
    }
}
