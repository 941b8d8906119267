pub mod breadcrumb;
pub mod insight;
pub mod layout;
pub mod navbar;
pub mod sidebar;
