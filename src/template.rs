//! Email templates for room events and alerts.
//!
//! Subjects and bodies are embedded minijinja templates. Bodies are `.html`
//! templates, so minijinja auto-escapes every payload field before it reaches
//! the message; subjects are plain text.
//!
//! # Example
//!
//! ```ignore
//! use roommail::template::TemplateEngine;
//!
//! let engine = TemplateEngine::new("MiroTalk SFU", 3010, TimestampFormat::default());
//! let email = engine.render(AlertEvent::Join, &data)?;
//! println!("{}", email.subject);
//! ```

use crate::config::Config;
use crate::error::TemplateError;
use crate::event::{AlertEvent, RoomEventData};
use crate::timestamp::TimestampFormat;
use minijinja::{Environment, UndefinedBehavior, Value, context};

const JOIN_ROOM_SUBJECT: &str = "join_room_subject.txt";
const WIDGET_ROOM_SUBJECT: &str = "widget_room_subject.txt";
const ALERT_SUBJECT: &str = "alert_subject.txt";
const JOIN_ROOM_BODY: &str = "join_room_body.html";
const ALERT_BODY: &str = "alert_body.html";

const TABLE_STYLE: &str = r#"<style>
    table {
        font-family: arial, sans-serif;
        border-collapse: collapse;
        width: 100%;
    }
    td {
        border: 1px solid #dddddd;
        text-align: left;
        padding: 8px;
    }
    tr:nth-child(even) {
        background-color: #dddddd;
    }
</style>"#;

const TEMPLATES: &[(&str, &str)] = &[
    (JOIN_ROOM_SUBJECT, "{{ app_name }} - 新用户加入房间 {{ room_id }}"),
    (
        WIDGET_ROOM_SUBJECT,
        "{{ app_name }} 小配件 - 新用户请在房间等待专家帮助 {{ room_id }}",
    ),
    (ALERT_SUBJECT, "{{ subject or (app_name ~ ' - Alert') }}"),
    (
        JOIN_ROOM_BODY,
        r#"<h1>新用户加入</h1>
{{ style }}
<table>
    <tr>
        <td>用户</td>
        <td>{{ peer_name }}</td>
    </tr>
    <tr>
        <td>操作系统</td>
        <td>{{ os }}</td>
    </tr>
    <tr>
        <td>浏览器</td>
        <td>{{ browser }}</td>
    </tr>
    <tr>
        <td>房间</td>
        <td><a href="{{ room_href }}">{{ room_link }}</a></td>
    </tr>
    <tr>
        <td>时间</td>
        <td>{{ timestamp }}</td>
    </tr>
</table>"#,
    ),
    (
        ALERT_BODY,
        r#"<h1>🚨 警报</h1>
{{ style }}
<table>
    <tr>
        <td>⚠️ 通知</td>
        <td>{{ body }}</td>
    </tr>
    <tr>
        <td>🕒 时间</td>
        <td>{{ timestamp }}</td>
    </tr>
</table>"#,
    ),
];

/// Subject and HTML body ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Build the link participants follow to join a room.
///
/// Loopback domains (any domain containing `localhost` or `127.0.0.1`,
/// including `localhost.example.com`) get the server listening port appended.
pub fn room_link(domain: &str, room_id: &str, listen_port: u16) -> String {
    let is_local = domain.contains("localhost") || domain.contains("127.0.0.1");
    if is_local {
        format!("https://{}:{}/join/{}", domain, listen_port, room_id)
    } else {
        format!("https://{}/join/{}", domain, room_id)
    }
}

/// Escape markup characters in link text and attributes. Unlike minijinja's
/// `HtmlEscape`, `/` is left alone so the link reads as a URL.
fn escape_link_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders the subject and body for each event.
///
/// Holds the brand context and a single pre-loaded environment; rendering
/// has no side effects beyond reading the clock for the body timestamp.
pub struct TemplateEngine {
    env: Environment<'static>,
    app_name: String,
    listen_port: u16,
    timestamp: TimestampFormat,
}

impl TemplateEngine {
    pub fn new(app_name: impl Into<String>, listen_port: u16, timestamp: TimestampFormat) -> Self {
        let mut env = Environment::new();
        // Missing payload fields render as empty text.
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        for &(name, source) in TEMPLATES {
            // Embedded sources are covered by the tests below.
            if let Err(e) = env.add_template(name, source) {
                tracing::error!(template = %name, error = %e, "Failed to load embedded template");
            }
        }

        Self {
            env,
            app_name: app_name.into(),
            listen_port,
            timestamp,
        }
    }

    /// Engine configured from the brand, server and logging sections.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.app_name(),
            config.listen_port(),
            TimestampFormat::from_config(&config.logging),
        )
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Render the message for `event`, stamped with the current time.
    pub fn render(
        &self,
        event: AlertEvent,
        data: &RoomEventData,
    ) -> Result<RenderedEmail, TemplateError> {
        self.render_at(event, data, &self.timestamp.now())
    }

    /// Render the message for `event` with an explicit timestamp.
    pub fn render_at(
        &self,
        event: AlertEvent,
        data: &RoomEventData,
        timestamp: &str,
    ) -> Result<RenderedEmail, TemplateError> {
        tracing::trace!(event = event.as_str(), "Starting template render");

        let (subject, html) = match event {
            AlertEvent::Join => (
                self.join_room_subject(data)?,
                self.join_room_body(data, timestamp)?,
            ),
            AlertEvent::Widget => (
                self.widget_room_subject(data)?,
                self.join_room_body(data, timestamp)?,
            ),
            AlertEvent::Alert => (self.alert_subject(data)?, self.alert_body(data, timestamp)?),
        };

        Ok(RenderedEmail { subject, html })
    }

    pub fn join_room_subject(&self, data: &RoomEventData) -> Result<String, TemplateError> {
        self.render_template(
            JOIN_ROOM_SUBJECT,
            context! { app_name => &self.app_name, room_id => &data.room_id },
        )
    }

    pub fn widget_room_subject(&self, data: &RoomEventData) -> Result<String, TemplateError> {
        self.render_template(
            WIDGET_ROOM_SUBJECT,
            context! { app_name => &self.app_name, room_id => &data.room_id },
        )
    }

    /// The payload subject when non-empty, else `"<app_name> - Alert"`.
    pub fn alert_subject(&self, data: &RoomEventData) -> Result<String, TemplateError> {
        self.render_template(
            ALERT_SUBJECT,
            context! { app_name => &self.app_name, subject => &data.subject },
        )
    }

    /// Body shared by `join` and `widget`.
    pub fn join_room_body(
        &self,
        data: &RoomEventData,
        timestamp: &str,
    ) -> Result<String, TemplateError> {
        // Built from escaped parts and marked safe so the slashes stay readable.
        // Only the href is percent-encoded; the link text keeps the room name.
        let domain = escape_link_text(&data.domain);
        let href = room_link(&domain, &urlencoding::encode(&data.room_id), self.listen_port);
        let link = room_link(&domain, &escape_link_text(&data.room_id), self.listen_port);

        self.render_template(
            JOIN_ROOM_BODY,
            context! {
                style => Value::from_safe_string(TABLE_STYLE.to_string()),
                peer_name => &data.peer_name,
                os => &data.os,
                browser => &data.browser,
                room_href => Value::from_safe_string(href),
                room_link => Value::from_safe_string(link),
                timestamp => Value::from_safe_string(timestamp.to_string()),
            },
        )
    }

    pub fn alert_body(&self, data: &RoomEventData, timestamp: &str) -> Result<String, TemplateError> {
        self.render_template(
            ALERT_BODY,
            context! {
                style => Value::from_safe_string(TABLE_STYLE.to_string()),
                body => &data.body,
                timestamp => Value::from_safe_string(timestamp.to_string()),
            },
        )
    }

    fn render_template(&self, name: &str, ctx: Value) -> Result<String, TemplateError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("app_name", &self.app_name)
            .field("listen_port", &self.listen_port)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
