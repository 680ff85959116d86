//! Fixed path components of the movie API.

pub const MOVIE: &str = "movie";
pub const POPULAR: &str = "popular";
pub const TOP_RATED: &str = "top_rated";
pub const UPCOMING: &str = "upcoming";
pub const NOW_PLAYING: &str = "now_playing";
pub const CREDITS: &str = "credits";
pub const VIDEOS: &str = "videos";
pub const SEARCH: &str = "search";
pub const GENRE: &str = "genre";
pub const LIST: &str = "list";
