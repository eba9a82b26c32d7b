use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::application::tag_service::TagService;
use crate::data::post_repository::PostRepository;
use crate::data::tag_repository::TagRepository;
use crate::domain::lang::Lang;
use crate::infrastructure::settings::Settings;

pub(crate) mod http;

pub(crate) type SharedPostService = PostService<Arc<dyn PostRepository>>;
pub(crate) type SharedTagService = TagService<Arc<dyn TagRepository>>;

/// Per-deployment values the handlers need besides the services.
#[derive(Debug, Clone)]
pub(crate) struct SiteConfig {
    pub(crate) site_url: String,
    pub(crate) default_lang: Lang,
    pub(crate) page_size: u32,
}

impl From<&Settings> for SiteConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            site_url: settings.site_url.clone(),
            default_lang: settings.default_lang,
            page_size: settings.page_size,
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<SharedPostService>,
    pub(crate) tag_service: Arc<SharedTagService>,
    pub(crate) site: Arc<SiteConfig>,
}

impl AppState {
    pub(crate) fn new(
        post_service: SharedPostService,
        tag_service: SharedTagService,
        site: SiteConfig,
    ) -> Self {
        Self {
            post_service: Arc::new(post_service),
            tag_service: Arc::new(tag_service),
            site: Arc::new(site),
        }
    }
}
