use crate::services::link_service::LinkService;

pub struct AppState {
    pub links: LinkService,
}
