use dc_core::{Error, Result, FRONTPAGE};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A listing the API can serve: the frontpage or a named section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Section {
    Frontpage,
    Named(String),
}

impl Section {
    /// Key used for the section in the store.
    pub fn name(&self) -> &str {
        match self {
            Section::Frontpage => FRONTPAGE,
            Section::Named(name) => name,
        }
    }

    /// `{base}/.json` for the frontpage, `{base}/section/{name}.json` otherwise.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidUrl(format!("{} cannot be used as a base URL", base)))?;
            segments.pop_if_empty();
            match self {
                Section::Frontpage => {
                    segments.push(".json");
                }
                Section::Named(name) => {
                    segments.push("section").push(&format!("{}.json", name));
                }
            }
        }
        Ok(url)
    }
}

impl FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            return Err(Error::Config("Section name cannot be empty".to_string()));
        }
        if name == FRONTPAGE {
            Ok(Section::Frontpage)
        } else {
            Ok(Section::Named(name.to_string()))
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
