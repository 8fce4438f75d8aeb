pub mod cascade;
pub mod designer_service;
pub mod stage;
pub mod timeline;
