// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod credentials;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod services;
