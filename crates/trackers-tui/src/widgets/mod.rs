pub mod pane_chrome;
pub mod selectable_list;
pub mod status_bar;
pub mod toast;
