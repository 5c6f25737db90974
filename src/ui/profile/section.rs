use std::fmt;
use std::str::FromStr;

/// One of the signed-in user's activity lists under `/users/me/{section}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeSection {
    #[default]
    Posts,
    Comments,
    Likes,
}

impl MeSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeSection::Posts => "posts",
            MeSection::Comments => "comments",
            MeSection::Likes => "likes",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MeSection::Posts => "Your Posts",
            MeSection::Comments => "Your Comments",
            MeSection::Likes => "Your Likes",
        }
    }
}

impl fmt::Display for MeSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posts" => Ok(MeSection::Posts),
            "comments" => Ok(MeSection::Comments),
            "likes" => Ok(MeSection::Likes),
            other => Err(format!("Unknown profile section: {}", other)),
        }
    }
}
