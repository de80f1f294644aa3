pub mod company;
pub mod contact;
pub mod kanban;
pub mod normalized;
pub mod partner;
