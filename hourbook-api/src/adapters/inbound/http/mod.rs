mod csv_export;
mod responses;

pub use csv_export::render_matrix_csv;
pub use responses::*;
