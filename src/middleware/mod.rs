/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth (identity resolution / role guard) と HTTP 横断 layer
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
