//! Canonical column names and sentinel values.

/// Join key shared by sales, stock and dimension tables.
pub const CANONICAL_KEY: &str = "codigo_producto";
/// Canonical product display name column.
pub const PRODUCT_NAME_COLUMN: &str = "nombre_del_producto";
pub const CATEGORY_COLUMN: &str = "categoria";
pub const QUANTITY_COLUMN: &str = "cantidad";
pub const UNIT_PRICE_COLUMN: &str = "precio_unitario";
pub const SALE_DATE_COLUMN: &str = "fecha";
pub const RECEIPT_COLUMN: &str = "comprobante_num";
pub const CUSTOMER_COLUMN: &str = "cliente";
pub const STOCK_COLUMN: &str = "stock_disponible";
pub const STOCK_DATE_COLUMN: &str = "fecha_actualizacion";

/// Substituted for missing or unparseable dates.
pub const DATE_SENTINEL: &str = "1900-01-01";
/// Substituted for missing text ("no record").
pub const TEXT_SENTINEL: &str = "Sin registro";
/// Product name used when a key has no dimension record.
pub const NOT_FOUND_NAME: &str = "NO_ENCONTRADO";
/// Category used when a key has no dimension record.
pub const NOT_FOUND_CATEGORY: &str = "SIN_CATEGORIA";
