pub mod bridge_service;
