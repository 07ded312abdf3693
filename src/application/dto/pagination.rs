use crate::infra::constants::MAX_PER_PAGE;

#[derive(Debug, Clone, Copy)]
pub struct PageRequestDTO {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequestDTO {
    /// Normalised `(page, per_page, offset)`.
    pub fn bounds(&self) -> (i64, i64, i64) {
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        let page = self.page.max(1);
        (page, per_page, (page - 1) * per_page)
    }
}

#[derive(Debug, Clone)]
pub struct PageDTO<T> {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub items: Vec<T>,
}
