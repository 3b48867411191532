use crate::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the remote paging source for one page.
    FetchPage(PageRequest),
}
