// Copyright (c) 2025 Servcy
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 对接外部通信服务商
pub mod sendgrid_email;
pub mod twilio_sms;
