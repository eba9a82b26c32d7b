pub(crate) mod clock;
pub(crate) mod post_service;
pub(crate) mod tag_service;
