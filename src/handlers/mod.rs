pub mod assignments;
pub mod attendance;
pub mod common;
pub mod crews;
pub mod forum;
pub mod health;
pub mod inventory;
pub mod materials;
pub mod projects;
pub mod uploads;
pub mod users;
pub mod warehouses;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::events::EventSender;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates the business logic used by HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub materials: Arc<crate::services::materials::MaterialService>,
    pub warehouses: Arc<crate::services::warehouses::WarehouseService>,
    pub inventory: Arc<crate::services::inventory::InventoryService>,
    pub projects: Arc<crate::services::projects::ProjectService>,
    pub assignments: Arc<crate::services::assignments::AssignmentService>,
    pub crews: Arc<crate::services::crews::CrewService>,
    pub attendance: Arc<crate::services::attendance::AttendanceService>,
    pub forum: Arc<crate::services::forum::ForumService>,
    pub users: Arc<crate::services::users::UserService>,
    pub uploads: Arc<crate::services::uploads::UploadService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: EventSender, cfg: &AppConfig) -> Self {
        Self {
            materials: Arc::new(crate::services::materials::MaterialService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            warehouses: Arc::new(crate::services::warehouses::WarehouseService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            inventory: Arc::new(crate::services::inventory::InventoryService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            projects: Arc::new(crate::services::projects::ProjectService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            assignments: Arc::new(crate::services::assignments::AssignmentService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            crews: Arc::new(crate::services::crews::CrewService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            attendance: Arc::new(crate::services::attendance::AttendanceService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            forum: Arc::new(crate::services::forum::ForumService::new(
                db_pool.clone(),
                event_sender.clone(),
            )),
            users: Arc::new(crate::services::users::UserService::new(
                db_pool,
                event_sender,
            )),
            uploads: Arc::new(crate::services::uploads::UploadService::new(
                cfg.upload_dir.clone(),
                cfg.max_upload_bytes,
            )),
        }
    }
}
