// src/services/movie_service.rs
//
// Movie data access through the query cache
//
// Every read goes: RequestKey -> QueryCache -> Endpoint Registry -> RemoteClient.
// Nothing here touches the application store.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::cache::{KeyPrefix, QueryCache, RequestKey};
use crate::config::StalenessPolicy;
use crate::domain::{
    validate_list_page, BaseListType, CanonicalRequest, GenreCatalog, GenresResponse, MovieDetail,
    MovieId, MovieImageSet, MovieListPage, MovieListResponse, MovieVideoSet,
};
use crate::error::{AppError, AppResult};
use crate::integrations::tmdb::endpoints::MOVIE_ID_PARAM;
use crate::integrations::tmdb::{resolve_key, Operation, OperationFamily, RemoteClient};

const DISCOVER_SORT: &str = "popularity.desc";

/// Everything the query cache can hold
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    List(MovieListPage),
    Detail(MovieDetail),
    Images(MovieImageSet),
    Videos(MovieVideoSet),
    Genres(GenreCatalog),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::List(_) => "list",
            Payload::Detail(_) => "detail",
            Payload::Images(_) => "images",
            Payload::Videos(_) => "videos",
            Payload::Genres(_) => "genres",
        }
    }

    fn mismatch(self, expected: &str) -> AppError {
        AppError::Other(format!(
            "Cache returned {} payload where {} was expected",
            self.kind(),
            expected
        ))
    }

    pub fn into_list(self) -> AppResult<MovieListPage> {
        match self {
            Payload::List(page) => Ok(page),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn into_detail(self) -> AppResult<MovieDetail> {
        match self {
            Payload::Detail(detail) => Ok(detail),
            other => Err(other.mismatch("detail")),
        }
    }

    pub fn into_images(self) -> AppResult<MovieImageSet> {
        match self {
            Payload::Images(images) => Ok(images),
            other => Err(other.mismatch("images")),
        }
    }

    pub fn into_videos(self) -> AppResult<MovieVideoSet> {
        match self {
            Payload::Videos(videos) => Ok(videos),
            other => Err(other.mismatch("videos")),
        }
    }

    pub fn into_genres(self) -> AppResult<GenreCatalog> {
        match self {
            Payload::Genres(genres) => Ok(genres),
            other => Err(other.mismatch("genres")),
        }
    }
}

pub struct MovieService {
    client: Arc<RemoteClient>,
    cache: QueryCache<Payload>,
    staleness: StalenessPolicy,
}

impl MovieService {
    pub fn new(client: Arc<RemoteClient>, staleness: StalenessPolicy) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
            staleness,
        }
    }

    // ========================================================================
    // KEY DERIVATION
    // ========================================================================

    /// Cache key for a canonical list request. Equal requests give equal keys.
    pub fn list_key(request: &CanonicalRequest) -> RequestKey {
        match request {
            CanonicalRequest::ListByType { list_type, page } => {
                let operation = match list_type {
                    BaseListType::NowPlaying => Operation::NowPlaying,
                    BaseListType::TopRated => Operation::TopRated,
                    BaseListType::Upcoming => Operation::Upcoming,
                };
                RequestKey::new(operation).with_param("page", *page)
            }
            CanonicalRequest::Search { query, page } => RequestKey::new(Operation::Search)
                .with_param("query", query.as_str())
                .with_param("page", *page),
            CanonicalRequest::DiscoverByGenre { genre_id, page } => {
                RequestKey::new(Operation::Discover)
                    .with_param("with_genres", *genre_id)
                    .with_param("sort_by", DISCOVER_SORT)
                    .with_param("page", *page)
            }
        }
    }

    pub fn detail_key(movie_id: &MovieId) -> RequestKey {
        RequestKey::new(Operation::Detail).with_param(MOVIE_ID_PARAM, movie_id.as_str())
    }

    pub fn images_key(movie_id: &MovieId) -> RequestKey {
        RequestKey::new(Operation::Images).with_param(MOVIE_ID_PARAM, movie_id.as_str())
    }

    pub fn videos_key(movie_id: &MovieId) -> RequestKey {
        RequestKey::new(Operation::Videos).with_param(MOVIE_ID_PARAM, movie_id.as_str())
    }

    pub fn genres_key() -> RequestKey {
        RequestKey::new(Operation::Genres)
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub async fn fetch_list(&self, request: &CanonicalRequest) -> AppResult<MovieListPage> {
        let list_kind = request.list_kind();
        self.load(
            Self::list_key(request),
            self.staleness.list,
            move |response: MovieListResponse| {
                let page = MovieListPage::from_response(response, list_kind);
                validate_list_page(&page)?;
                Ok(Payload::List(page))
            },
        )
        .await?
        .into_list()
    }

    pub async fn fetch_detail(&self, movie_id: &MovieId) -> AppResult<MovieDetail> {
        self.load(
            Self::detail_key(movie_id),
            self.staleness.detail,
            |detail: MovieDetail| Ok(Payload::Detail(detail)),
        )
        .await?
        .into_detail()
    }

    pub async fn fetch_images(&self, movie_id: &MovieId) -> AppResult<MovieImageSet> {
        self.load(
            Self::images_key(movie_id),
            self.staleness.images,
            |images: MovieImageSet| Ok(Payload::Images(images)),
        )
        .await?
        .into_images()
    }

    pub async fn fetch_videos(&self, movie_id: &MovieId) -> AppResult<MovieVideoSet> {
        self.load(
            Self::videos_key(movie_id),
            self.staleness.videos,
            |videos: MovieVideoSet| Ok(Payload::Videos(videos)),
        )
        .await?
        .into_videos()
    }

    pub async fn fetch_genres(&self) -> AppResult<GenreCatalog> {
        self.load(
            Self::genres_key(),
            self.staleness.genres,
            |response: GenresResponse| Ok(Payload::Genres(GenreCatalog::from(response))),
        )
        .await?
        .into_genres()
    }

    // ========================================================================
    // CACHE MAINTENANCE
    // ========================================================================

    /// Seed the detail entry so the detail view paints without a round trip
    pub fn prime_detail(&self, detail: MovieDetail) {
        let key = Self::detail_key(&detail.movie_id());
        self.cache.write(key, Payload::Detail(detail));
    }

    /// Force every list, search and discover entry to refetch on next read
    pub fn invalidate_lists(&self) -> usize {
        self.cache.invalidate(&KeyPrefix::family(OperationFamily::List))
    }

    /// Forget everything cached about one movie
    pub fn forget_movie(&self, movie_id: &MovieId) -> usize {
        self.cache.remove(
            &KeyPrefix::family(OperationFamily::Movie).with_param(MOVIE_ID_PARAM, movie_id.as_str()),
        )
    }

    pub fn cache(&self) -> &QueryCache<Payload> {
        &self.cache
    }

    async fn load<T, F>(&self, key: RequestKey, staleness: Duration, wrap: F) -> AppResult<Payload>
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(T) -> AppResult<Payload> + Send + 'static,
    {
        // Rejected before any network call
        let endpoint = resolve_key(&key)?;
        let client = Arc::clone(&self.client);

        self.cache
            .fetch(key, staleness, move || async move {
                let body: T = client.get_json(&endpoint.path, &endpoint.query).await?;
                wrap(body)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStatus;
    use crate::domain::ListKind;
    use crate::events::EventBus;
    use crate::integrations::tmdb::transport::{MockTransport, TransportResponse};

    fn service(mock: MockTransport) -> MovieService {
        let bus = Arc::new(EventBus::new());
        let client = Arc::new(RemoteClient::new(Arc::new(mock), bus));
        MovieService::new(client, StalenessPolicy::default())
    }

    fn ok(body: &str) -> TransportResponse {
        TransportResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_list_key_is_deterministic() {
        let request = CanonicalRequest::Search {
            query: "dune".into(),
            page: 1,
        };
        assert_eq!(MovieService::list_key(&request), MovieService::list_key(&request.clone()));
        assert_eq!(
            MovieService::list_key(&request).to_string(),
            "search?page=1&query=dune"
        );
    }

    #[test]
    fn test_discover_key_carries_sort_order() {
        let key = MovieService::list_key(&CanonicalRequest::DiscoverByGenre {
            genre_id: 28,
            page: 3,
        });
        assert_eq!(
            key.to_string(),
            "discover?page=3&sort_by=popularity.desc&with_genres=28"
        );
    }

    #[tokio::test]
    async fn test_fetch_list_tags_list_kind() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| req.path == "/3/movie/top_rated" && req.query_param("page") == Some("2"))
            .times(1)
            .returning(|_| {
                Ok(ok(
                    r#"{"page":2,"total_pages":9,"results":[{"id":238,"title":"The Godfather"}]}"#,
                ))
            });

        let service = service(mock);
        let request = CanonicalRequest::ListByType {
            list_type: BaseListType::TopRated,
            page: 2,
        };

        let page = service.fetch_list(&request).await.unwrap();
        assert_eq!(page.list_kind, ListKind::TopRated);
        assert_eq!(page.results[0].title, "The Godfather");

        // Second read is served from cache
        let again = service.fetch_list(&request).await.unwrap();
        assert_eq!(again, page);
    }

    #[tokio::test]
    async fn test_prime_detail_skips_network() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(0);

        let service = service(mock);
        let detail: MovieDetail =
            serde_json::from_str(r#"{"id":42,"title":"Primed"}"#).unwrap();
        service.prime_detail(detail);

        let fetched = service
            .fetch_detail(&MovieId::parse("42").unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.title, "Primed");
    }

    #[tokio::test]
    async fn test_invalidate_lists_leaves_movies() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(2)
            .returning(|req| match req.path.as_str() {
                "/3/movie/now_playing" => Ok(ok(r#"{"page":1,"total_pages":1,"results":[]}"#)),
                _ => Ok(ok(r#"{"genres":[{"id":28,"name":"Action"}]}"#)),
            });

        let service = service(mock);
        let list = CanonicalRequest::ListByType {
            list_type: BaseListType::NowPlaying,
            page: 1,
        };
        service.fetch_list(&list).await.unwrap();
        service.fetch_genres().await.unwrap();

        assert_eq!(service.invalidate_lists(), 1);
        assert_eq!(
            service.cache().status(&MovieService::list_key(&list)),
            CacheStatus::Idle
        );
        assert_eq!(
            service.cache().status(&MovieService::genres_key()),
            CacheStatus::Success
        );
    }

    #[tokio::test]
    async fn test_forget_movie_removes_all_its_entries() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(0);

        let service = service(mock);
        let id = MovieId::parse("7").unwrap();
        service.cache().write(
            MovieService::images_key(&id),
            Payload::Images(MovieImageSet {
                id: 7,
                backdrops: Vec::new(),
                logos: Vec::new(),
                posters: Vec::new(),
            }),
        );
        service.prime_detail(serde_json::from_str(r#"{"id":7}"#).unwrap());
        service.prime_detail(serde_json::from_str(r#"{"id":8}"#).unwrap());

        assert_eq!(service.forget_movie(&id), 2);
        assert_eq!(service.cache().len(), 1);
    }
}
