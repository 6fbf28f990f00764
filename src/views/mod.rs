pub mod chart;
pub mod chat;
pub mod message;
pub mod sidebar;

pub use chart::ChartView;
pub use chat::ChatView;
pub use message::MessageBubble;
pub use sidebar::Sidebar;
