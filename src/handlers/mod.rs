pub mod children;
pub mod dashboards;
pub mod doses;
pub mod export;
