/*!
 * Caller context extractors
 *
 * Responsibility:
 * - access middleware が request extensions に入れた AuthContext を handler に提供する
 * - HTTP / axum 依存は core に閉じ込める
 *
 * Public API:
 * - Caller            (any resolved outcome, incl. service-level / public)
 * - CurrentIdentity   (per-user identity required, 401 otherwise)
 */

mod core;

pub use self::core::{Caller, CurrentIdentity};
