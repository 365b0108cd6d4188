// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_api_test;
pub mod billing_api_test;
pub mod document_api_test;
pub mod health_check;
pub mod helpers;
pub mod inbox_api_test;
pub mod integration_api_test;
pub mod notification_api_test;
pub mod webhook_api_test;
