pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod partner_repo;
pub use partner_repo::PartnerRepository;
pub mod kanban_repo;
pub use kanban_repo::KanbanRepository;
pub mod pool;
