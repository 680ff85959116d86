use serde::Serialize;

use crate::{
    endpoint::{segments, EndpointBuilder},
    error::{FlavorError, Result},
};

/// Paging/locale options shared by the movie list endpoints.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ListOptions {
    pub page: Option<u32>,
    pub language: Option<String>, // e.g. "en-US"
    pub region: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct SearchOptions {
    pub query: String,
    pub page: Option<u32>,
    pub include_adult: Option<bool>,
    pub language: Option<String>,
    pub year: Option<u16>,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// URL builders for the movie endpoints.
///
/// Every method returns a complete URL, with `api_key` attached when the
/// builder carries one.
pub trait MovieEndpoints {
    fn popular_movies(&self, opts: Option<&ListOptions>) -> Result<String>;

    fn top_rated_movies(&self, opts: Option<&ListOptions>) -> Result<String>;

    fn upcoming_movies(&self, opts: Option<&ListOptions>) -> Result<String>;

    fn now_playing_movies(&self, opts: Option<&ListOptions>) -> Result<String>;

    /// Details of one movie.
    fn movie_details(&self, movie_id: i64) -> Result<String>;

    fn movie_credits(&self, movie_id: i64) -> Result<String>;

    fn movie_videos(&self, movie_id: i64) -> Result<String>;

    /// Search by title. An empty query is rejected.
    fn search_movies(&self, opts: &SearchOptions) -> Result<String>;

    fn movie_genres(&self) -> Result<String>;
}

impl EndpointBuilder {
    fn movie_list(&self, list: &str, opts: Option<&ListOptions>) -> Result<String> {
        let mut url = self.build_path(&[segments::MOVIE, list])?;
        if let Some(o) = opts {
            url = self.with_query(&url, o)?;
        }
        self.sign(url)
    }

    fn movie_sub_resource(&self, movie_id: i64, sub: &str) -> Result<String> {
        let base = self.build_resource_path(&[segments::MOVIE], movie_id)?;
        let url = format!("{base}/{sub}");
        self.sign(url)
    }
}

impl MovieEndpoints for EndpointBuilder {
    fn popular_movies(&self, opts: Option<&ListOptions>) -> Result<String> {
        self.movie_list(segments::POPULAR, opts)
    }

    fn top_rated_movies(&self, opts: Option<&ListOptions>) -> Result<String> {
        self.movie_list(segments::TOP_RATED, opts)
    }

    fn upcoming_movies(&self, opts: Option<&ListOptions>) -> Result<String> {
        self.movie_list(segments::UPCOMING, opts)
    }

    fn now_playing_movies(&self, opts: Option<&ListOptions>) -> Result<String> {
        self.movie_list(segments::NOW_PLAYING, opts)
    }

    fn movie_details(&self, movie_id: i64) -> Result<String> {
        let url = self.build_resource_path(&[segments::MOVIE], movie_id)?;
        self.sign(url)
    }

    fn movie_credits(&self, movie_id: i64) -> Result<String> {
        self.movie_sub_resource(movie_id, segments::CREDITS)
    }

    fn movie_videos(&self, movie_id: i64) -> Result<String> {
        self.movie_sub_resource(movie_id, segments::VIDEOS)
    }

    fn search_movies(&self, opts: &SearchOptions) -> Result<String> {
        if opts.query.trim().is_empty() {
            return Err(FlavorError::invalid("search query must not be empty"));
        }
        let url = self.build_path(&[segments::SEARCH, segments::MOVIE])?;
        let url = self.with_query(&url, opts)?;
        self.sign(url)
    }

    fn movie_genres(&self) -> Result<String> {
        let url = self.build_path(&[segments::GENRE, segments::MOVIE, segments::LIST])?;
        self.sign(url)
    }
}
