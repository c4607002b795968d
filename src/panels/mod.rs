mod central_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use tools_panel::{tools_panel, ToolbarAction};
