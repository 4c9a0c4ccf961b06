//! Editor application layer: the edit session, derived views, load/save and
//! the controller that ties them to UI state.

pub mod load_save;
pub mod notice;
pub mod region_editor;
pub mod session;
pub mod views;

pub use load_save::{load, load_access_policy, save, LoadError, SaveError};
pub use notice::{Notice, NoticeKind};
pub use region_editor::{EditorState, MoveSelection, PendingDelete, RegionConfigEditor};
pub use session::{apply, EditRejection, RegionEdit, RegionEditSession};
pub use views::{
    filter_for_bulk_add, grouped_by_region, unmapped_cities, BulkAddCandidate, RegionGroup,
};
