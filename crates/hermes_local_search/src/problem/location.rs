use crate::define_index_newtype;

// Row/column of the travel cost matrix.
define_index_newtype!(LocationIdx);
