// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// 成功响应 `{"detail": ..., "results": ...}`
pub fn success<T: Serialize>(detail: &str, results: T) -> Json<Value> {
    Json(json!({
        "detail": detail,
        "results": results,
    }))
}

/// 没有附带数据的成功响应
pub fn success_message(detail: &str) -> Json<Value> {
    success(detail, Value::Null)
}
