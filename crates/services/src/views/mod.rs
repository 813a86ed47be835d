mod dashboard;
mod state;
mod vocabulary;

pub use dashboard::{DashboardData, DashboardView, fetch_dashboard};
pub use state::{LoadTicket, ViewScope, ViewState};
pub use vocabulary::{VocabularyData, VocabularyView, fetch_vocabulary};
