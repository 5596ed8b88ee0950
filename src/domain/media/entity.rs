use serde::{Deserialize, Serialize};

/// One still image (backdrop, logo or poster)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub file_path: String,

    #[serde(default)]
    pub width: u32,

    #[serde(default)]
    pub height: u32,

    #[serde(default)]
    pub aspect_ratio: f64,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieImageSet {
    pub id: u64,

    #[serde(default)]
    pub backdrops: Vec<ImageDescriptor>,

    #[serde(default)]
    pub logos: Vec<ImageDescriptor>,

    #[serde(default)]
    pub posters: Vec<ImageDescriptor>,
}

impl MovieImageSet {
    /// Absolute URLs for the first `limit` backdrops
    pub fn backdrop_urls(&self, image_base_url: &str, limit: usize) -> Vec<String> {
        self.backdrops
            .iter()
            .take(limit)
            .map(|image| image_url(image_base_url, &image.file_path))
            .collect()
    }
}

/// Join an image base URL and a file path such as `/abc.jpg`
pub fn image_url(image_base_url: &str, file_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        file_path.trim_start_matches('/')
    )
}

/// One video (trailer, teaser, clip...) attached to a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    #[serde(default)]
    pub id: String,

    pub key: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub site: String,

    #[serde(rename = "type", default)]
    pub video_type: String,

    #[serde(default)]
    pub official: bool,

    #[serde(default)]
    pub size: u32,

    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub iso_639_1: Option<String>,

    #[serde(default)]
    pub iso_3166_1: Option<String>,
}

impl VideoDescriptor {
    fn is_youtube_trailer(&self) -> bool {
        self.site == "YouTube" && self.video_type == "Trailer"
    }

    /// Watch URL, only for videos hosted on YouTube
    pub fn youtube_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("https://www.youtube.com/watch?v={}", self.key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieVideoSet {
    pub id: u64,

    #[serde(default)]
    pub results: Vec<VideoDescriptor>,
}

impl MovieVideoSet {
    /// Official YouTube trailer first, then any YouTube trailer
    pub fn trailer(&self) -> Option<&VideoDescriptor> {
        self.results
            .iter()
            .find(|v| v.is_youtube_trailer() && v.official)
            .or_else(|| self.results.iter().find(|v| v.is_youtube_trailer()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn videos(results: serde_json::Value) -> MovieVideoSet {
        serde_json::from_value(json!({ "id": 42, "results": results })).unwrap()
    }

    #[test]
    fn test_trailer_prefers_official() {
        let set = videos(json!([
            { "key": "teaser", "site": "YouTube", "type": "Teaser", "official": true },
            { "key": "fan", "site": "YouTube", "type": "Trailer", "official": false },
            { "key": "vimeo", "site": "Vimeo", "type": "Trailer", "official": true },
            { "key": "real", "site": "YouTube", "type": "Trailer", "official": true }
        ]));

        assert_eq!(set.trailer().unwrap().key, "real");
    }

    #[test]
    fn test_trailer_falls_back_to_unofficial() {
        let set = videos(json!([
            { "key": "fan", "site": "YouTube", "type": "Trailer", "official": false }
        ]));

        let trailer = set.trailer().unwrap();
        assert_eq!(trailer.key, "fan");
        assert_eq!(
            trailer.youtube_url().as_deref(),
            Some("https://www.youtube.com/watch?v=fan")
        );
    }

    #[test]
    fn test_no_trailer() {
        let set = videos(json!([
            { "key": "clip", "site": "YouTube", "type": "Clip", "official": true }
        ]));
        assert!(set.trailer().is_none());
    }

    #[test]
    fn test_backdrop_urls_are_limited() {
        let backdrops: Vec<serde_json::Value> = (0..25)
            .map(|i| json!({ "file_path": format!("/b{}.jpg", i) }))
            .collect();
        let set: MovieImageSet =
            serde_json::from_value(json!({ "id": 42, "backdrops": backdrops })).unwrap();

        let urls = set.backdrop_urls("https://image.tmdb.org/t/p/original/", 20);
        assert_eq!(urls.len(), 20);
        assert_eq!(urls[0], "https://image.tmdb.org/t/p/original/b0.jpg");
    }
}
