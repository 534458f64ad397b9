use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Sparkline, Widget, Wrap},
};

use crate::assistant::{Assistant, ChatAuthor, ASSISTANT_NAME};
use crate::models::{ExerciseDefinition, Patient, FaqEntry, Therapist};
use crate::notify::Severity;
use crate::session::onboarding::{CONDITION_OPTIONS, GOAL_OPTIONS};
use crate::session::{
    ActivityLevel, ExerciseSession, OnboardingWizard, Session, SessionFlow, SessionStatus, ViewId,
};

use super::app::{ActiveToast, App};

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().fg(Color::Gray))
}

fn value(text: String, color: Color) -> Span<'static> {
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Render the landing screen shown before sign-in
pub fn render_landing(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" RehabConnect ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Transform Your Recovery Journey",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Guided exercises, live form feedback, and a care team"),
        Line::from("that follows your progress - all from your terminal."),
        Line::from(""),
        Line::from(vec![
            value("p".to_string(), Color::Green),
            label("  sign in as a patient"),
        ]),
        Line::from(vec![
            value("t".to_string(), Color::Green),
            label("  sign in as a therapist"),
        ]),
        Line::from(vec![
            value("d".to_string(), Color::Green),
            label("  try the demo account"),
        ]),
        Line::from(vec![value("q".to_string(), Color::Red), label("  quit")]),
    ];

    Paragraph::new(lines).render(inner, buf);
}

/// Render the 4-step intake wizard
pub fn render_onboarding(area: Rect, buf: &mut Buffer, wizard: &OnboardingWizard) {
    let title = format!(
        " Welcome - Step {} of 4 ({}%) ",
        wizard.step(),
        wizard.progress_percent()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let answers = &wizard.answers;
    let mut lines = Vec::new();

    match wizard.step() {
        1 => {
            lines.push(Line::from(Span::styled(
                "Tell us about your condition ('c' cycles)",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for condition in CONDITION_OPTIONS {
                let selected = answers.condition.as_deref() == Some(condition);
                let marker = if selected { "●" } else { "○" };
                let style = if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(Span::styled(
                    format!("{} {}", marker, condition),
                    style,
                )));
            }
            lines.push(Line::from(""));
            let pain = answers
                .pain_level
                .map(|p| format!("{}/10", p))
                .unwrap_or_else(|| "not set".to_string());
            lines.push(Line::from(vec![
                label("Pain level (press 0-9): "),
                value(pain, Color::Yellow),
            ]));
        }
        2 => {
            lines.push(Line::from(Span::styled(
                "How active were you before your injury?",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for (i, level) in ActivityLevel::ALL.iter().enumerate() {
                let selected = answers.activity_level == Some(*level);
                let marker = if selected { "●" } else { "○" };
                let style = if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(Span::styled(
                    format!("{} {}. {}", marker, i + 1, level),
                    style,
                )));
            }
        }
        3 => {
            lines.push(Line::from(Span::styled(
                "Pick your recovery goals (toggle with 1-5)",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            for (i, goal) in GOAL_OPTIONS.iter().enumerate() {
                let selected = answers.goals.contains(*goal);
                let marker = if selected { "☑" } else { "☐" };
                let style = if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(Span::styled(
                    format!("{} {}. {}", marker, i + 1, goal),
                    style,
                )));
            }
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "Your personalized plan",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            if let Some(condition) = &answers.condition {
                lines.push(Line::from(vec![
                    label("Condition: "),
                    value(condition.clone(), Color::Cyan),
                ]));
            }
            if let Some(pain) = answers.pain_level {
                lines.push(Line::from(vec![
                    label("Pain level: "),
                    value(format!("{}/10", pain), Color::Yellow),
                ]));
            }
            if let Some(activity) = answers.activity_level {
                lines.push(Line::from(vec![
                    label("Activity level: "),
                    value(activity.to_string(), Color::Cyan),
                ]));
            }
            let goals: Vec<&str> = answers.goals.iter().map(String::as_str).collect();
            if !goals.is_empty() {
                lines.push(Line::from(vec![
                    label("Goals: "),
                    value(goals.join(", "), Color::Green),
                ]));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if wizard.step() == 4 {
            "'n' complete setup · 'p' back"
        } else {
            "'n' next · 'p' back"
        },
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render the signed-in header with points, streak and level
pub fn render_header(area: Rect, buf: &mut Buffer, flow: &SessionFlow) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" RehabConnect ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let progress = &flow.progress;
    let line = Line::from(vec![
        value(flow.session.user_name.clone(), Color::White),
        label("  ·  "),
        value(format!("Level {}", progress.level()), Color::Cyan),
        label("  ·  "),
        value(format!("{} pts", progress.total_points), Color::Green),
        label("  ·  "),
        value(format!("{}-day streak 🔥", progress.streak_days), Color::Yellow),
    ]);

    Paragraph::new(line).render(inner, buf);
}

/// Render the numbered navigation bar for the current role
pub fn render_nav(area: Rect, buf: &mut Buffer, session: &Session) {
    let views = ViewId::for_role(session.role);
    let mut spans = Vec::new();

    for (i, view) in views.iter().enumerate() {
        let active = *view == session.current_view;
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, view.title()), style));
        spans.push(Span::raw(" "));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}

/// Render the dashboard view: today's exercises and badge preview
pub fn render_dashboard(area: Rect, buf: &mut Buffer, flow: &SessionFlow) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🏠 Dashboard ")
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![
        Line::from(Span::styled(
            "Today's Exercises",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for exercise in flow.catalog.exercises().iter().take(3) {
        lines.push(Line::from(vec![
            value(exercise.name.clone(), Color::Cyan),
            label("  "),
            Span::raw(format!(
                "{} · {} · {} pts",
                exercise.category, exercise.difficulty, exercise.points
            )),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Recent Achievements",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    for badge in flow.catalog.achievements().iter().take(3) {
        let owned = flow.progress.has_badge(&badge.name);
        let style = if owned {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {} - {}", badge.icon, badge.name, badge.description),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press '2' then Enter to start an exercise",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render the exercise catalog with the current selection highlighted
pub fn render_exercises(
    area: Rect,
    buf: &mut Buffer,
    exercises: &[ExerciseDefinition],
    selected_index: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🏋 Exercises ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let items: Vec<ListItem> = exercises
        .iter()
        .enumerate()
        .map(|(idx, exercise)| {
            let line_style = if idx == selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let target = if exercise.is_rep_based() {
                format!("{} reps", exercise.target())
            } else {
                format!("{} sec", exercise.target())
            };

            let content = format!(
                "{} {:<22} {:<12} {:<13} {:>8} {:>7}",
                if idx == selected_index { ">" } else { " " },
                exercise.name,
                exercise.category.to_string(),
                exercise.difficulty.to_string(),
                target,
                format!("{} pts", exercise.points),
            );

            ListItem::new(Line::from(Span::styled(content, line_style)))
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render the progress view with the fixture trend series
pub fn render_progress(area: Rect, buf: &mut Buffer, flow: &SessionFlow) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 📈 Progress ")
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let series = flow.catalog.progress_series();

    let mut lines = vec![
        Line::from(vec![
            label("Sessions completed: "),
            value(flow.progress.completed_sessions.to_string(), Color::Green),
            label("   Total points: "),
            value(flow.progress.total_points.to_string(), Color::Cyan),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Monthly trends (weeks 1-4)",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let trends: [(&str, &[u64; 4]); 4] = [
        ("Range of motion", &series.range_of_motion),
        ("Strength", &series.strength),
        ("Balance", &series.balance),
        ("Endurance", &series.endurance),
    ];
    for (name, values) in trends {
        let rendered: Vec<String> = values.iter().map(|v| format!("{:>3}%", v)).collect();
        lines.push(Line::from(format!(
            "  {:<16} {}",
            name,
            rendered.join("  ")
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Weekly adherence",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    Paragraph::new(lines).render(inner, buf);

    // Sparkline under the text block when there is room
    if inner.height > 10 {
        let spark_area = Rect {
            x: inner.x + 2,
            y: inner.y + 10,
            width: inner.width.saturating_sub(4),
            height: 3,
        };
        Sparkline::default()
            .data(&flow.catalog.progress_series().weekly_adherence)
            .style(Style::default().fg(Color::Green))
            .render(spark_area, buf);
    }
}

/// Render the achievements grid
pub fn render_achievements(area: Rect, buf: &mut Buffer, flow: &SessionFlow) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🏆 Achievements ")
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    for badge in flow.catalog.achievements() {
        let owned = flow.progress.has_badge(&badge.name);
        let (marker, style) = if owned {
            ("✓", Style::default().fg(Color::Green))
        } else {
            ("·", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} {} {}  ({} pts · {})",
                marker, badge.icon, badge.name, badge.points, badge.rarity
            ),
            style.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("     {}", badge.description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render the therapist's patient roster
pub fn render_patients(
    area: Rect,
    buf: &mut Buffer,
    patients: &[Patient],
    selected_index: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🧑 Patients ")
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    for (idx, patient) in patients.iter().enumerate() {
        let risk_color = match patient.risk_level {
            crate::models::RiskLevel::Low => Color::Green,
            crate::models::RiskLevel::Medium => Color::Yellow,
            crate::models::RiskLevel::High => Color::Red,
        };
        let name_color = if idx == selected_index {
            Color::Yellow
        } else {
            Color::Cyan
        };
        lines.push(Line::from(vec![
            Span::raw(if idx == selected_index { "> " } else { "  " }),
            value(patient.name.clone(), name_color),
            label("  "),
            Span::raw(patient.condition.clone()),
        ]));
        lines.push(Line::from(vec![
            label("   "),
            Span::styled(
                format!("{} risk", patient.risk_level),
                Style::default().fg(risk_color),
            ),
            label("  ·  "),
            Span::raw(format!(
                "{}% adherence · {}-day streak · level {}",
                patient.adherence_rate, patient.current_streak, patient.level
            )),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "   ROM {}% · strength {}% · balance {}% · endurance {}%",
                patient.progress_metrics.range_of_motion,
                patient.progress_metrics.strength,
                patient.progress_metrics.balance,
                patient.progress_metrics.endurance
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render the support view: care team + FAQs
pub fn render_support(
    area: Rect,
    buf: &mut Buffer,
    faqs: &[FaqEntry],
    therapists: &[Therapist],
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 💬 Support ")
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    for therapist in therapists {
        lines.push(Line::from(vec![
            label("Your therapist: "),
            value(therapist.name.clone(), Color::Cyan),
            Span::raw(format!(" ({})", therapist.credentials.join(", "))),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {} · {}", therapist.phone, therapist.email),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    for faq in faqs {
        lines.push(Line::from(Span::styled(
            faq.question.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("   {}", faq.answer),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render the about view
pub fn render_about(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" About ")
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(Span::styled(
            "RehabConnect",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Gamified Remote Rehabilitation Platform"),
        Line::from(""),
        Line::from("Guided exercise sessions with simulated motion tracking,"),
        Line::from("progress analytics, and achievement-based motivation."),
    ];

    Paragraph::new(lines).render(inner, buf);
}

/// Render the bottom status bar with key hints
pub fn render_status_bar(area: Rect, buf: &mut Buffer, app: &App) {
    let hint = if app.flow.active_session().is_some() {
        "p pause/resume · c complete · x stop"
    } else if app.assistant_open {
        "type a message · Enter send · Esc close"
    } else {
        "1-6 views · ↑↓ select · Enter start · a assistant · l logout · ? help · q quit"
    };

    Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )))
    .render(area, buf);
}

/// Render the live exercise session overlay
pub fn render_session_overlay(
    area: Rect,
    buf: &mut Buffer,
    session: &ExerciseSession,
    feedback: &VecDeque<String>,
    form_score: Option<u32>,
    range_of_motion: Option<u32>,
) {
    Clear.render(area, buf);

    let title = format!(" ▶ {} ", session.exercise.name);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(area);
    block.render(area, buf);

    let status = match session.status() {
        SessionStatus::Running => value("RUNNING".to_string(), Color::Green),
        SessionStatus::Paused => value("PAUSED".to_string(), Color::Yellow),
        SessionStatus::Completed => value("COMPLETED".to_string(), Color::Cyan),
    };

    let mut lines = vec![
        Line::from(vec![label("Status: "), status]),
        Line::from(vec![
            label("Time: "),
            value(session.formatted_elapsed(), Color::White),
            label("    Reps: "),
            value(
                format!("{}/{}", session.completed_reps, session.target),
                Color::Cyan,
            ),
        ]),
        Line::from(vec![
            label("Form: "),
            value(
                form_score.map_or("--".to_string(), |v| format!("{}%", v)),
                Color::Green,
            ),
            label("    Range of motion: "),
            value(
                range_of_motion.map_or("--".to_string(), |v| format!("{}°", v)),
                Color::Green,
            ),
        ]),
        Line::from(""),
    ];

    if session.completion_unlocked() {
        lines.push(Line::from(Span::styled(
            "Target reached - press 'c' to complete",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }

    for message in feedback {
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Green),
        )));
    }

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render the assistant chat panel
pub fn render_assistant_panel(area: Rect, buf: &mut Buffer, assistant: &Assistant, input: &str) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" 🤖 {} ", ASSISTANT_NAME))
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    for insight in assistant.insights() {
        lines.push(Line::from(Span::styled(
            format!("· {}", insight),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // Show as much recent transcript as fits above the input line
    let available = inner.height.saturating_sub(lines.len() as u16 + 2) as usize;
    let transcript = assistant.transcript();
    let start = transcript.len().saturating_sub(available);
    for message in &transcript[start..] {
        let (prefix, color) = match message.author {
            ChatAuthor::User => ("you", Color::White),
            ChatAuthor::Assistant => (ASSISTANT_NAME, Color::Cyan),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", prefix), Style::default().fg(color)),
            Span::raw(message.text.clone()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Green)),
        Span::raw(input.to_string()),
        Span::styled("▌", Style::default().fg(Color::Green)),
    ]));

    Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
}

/// Render queued toasts stacked in the top-right corner
pub fn render_toasts(area: Rect, buf: &mut Buffer, toasts: &VecDeque<ActiveToast>) {
    let width = 44u16.min(area.width);
    for (i, active) in toasts.iter().take(4).enumerate() {
        let toast_area = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.y + 1 + (i as u16 * 3),
            width,
            height: 3,
        };
        if toast_area.bottom() > area.bottom() {
            break;
        }

        let color = match active.toast.severity {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Warning => Color::Yellow,
        };

        Clear.render(toast_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let inner = block.inner(toast_area);
        block.render(toast_area, buf);

        Paragraph::new(Span::styled(
            active.toast.message.clone(),
            Style::default().fg(color),
        ))
        .render(inner, buf);
    }
}

/// Render the help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(Span::styled(
            "Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  1-6      switch views"),
        Line::from("  Tab      next view"),
        Line::from("  ↑/↓ j/k  move selection"),
        Line::from(""),
        Line::from(Span::styled(
            "Exercise session",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Enter/s  start selected exercise"),
        Line::from("  v        preview selected exercise"),
        Line::from("  p/space  pause or resume"),
        Line::from("  c        complete (once target reached)"),
        Line::from("  x/Esc    stop without completing"),
        Line::from(""),
        Line::from(Span::styled(
            "Other",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  a        assistant chat"),
        Line::from("  l        sign out"),
        Line::from("  ?        toggle this help"),
        Line::from("  q        quit"),
    ];

    Paragraph::new(lines).render(inner, buf);
}
