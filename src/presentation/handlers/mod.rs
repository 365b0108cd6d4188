// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_handler;
pub mod billing_handler;
pub mod document_handler;
pub mod inbox_handler;
pub mod integration_handler;
pub mod notification_handler;
pub mod webhook_handler;
pub mod workspace_scope;
