pub(crate) mod error;
pub(crate) mod lang;
pub(crate) mod pagination;
pub(crate) mod post;
