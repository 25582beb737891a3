use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::io::{self, Stdout};
use std::rc::Rc;
use taskboost_core::time::{due_label, initials, status_label};
use taskboost_core::{
    Notification, NotificationLog, ProfileSummary, RewardsSummary, Seed, StatusCounts,
    StatusFilter, Task, TaskDraft, TaskStatus, TaskStore, Tone, User, departments, leaderboard,
    parse_date, status_counts, user_by_id,
};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Assignee,
    Department,
    Due,
    Reward,
}

impl Field {
    const ORDER: [Field; 6] = [
        Self::Title,
        Self::Description,
        Self::Assignee,
        Self::Department,
        Self::Due,
        Self::Reward,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Title => "Task Title",
            Self::Description => "Description",
            Self::Assignee => "Assign To",
            Self::Department => "Department",
            Self::Due => "Due Date (YYYY-MM-DD)",
            Self::Reward => "Reward ($)",
        }
    }

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }
}

/// The add-task modal's field values.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AddTaskForm {
    title: String,
    description: String,
    assignee: Option<usize>,
    department: Option<usize>,
    due: String,
    reward: String,
    focus: Field,
}

impl AddTaskForm {
    fn new(default_reward: u32) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            assignee: None,
            department: None,
            due: String::new(),
            reward: default_reward.to_string(),
            focus: Field::Title,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Due => Some(&mut self.due),
            Field::Reward => Some(&mut self.reward),
            Field::Assignee | Field::Department => None,
        }
    }

    fn type_char(&mut self, c: char) {
        let focus = self.focus;
        if let Some(s) = self.text_mut() {
            // whole dollars only, and never past u32::MAX
            if focus == Field::Reward
                && !(c.is_ascii_digit() && format!("{s}{c}").parse::<u32>().is_ok())
            {
                return;
            }
            s.push(c);
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            Field::Assignee => self.assignee = None,
            Field::Department => self.department = None,
            _ => {
                if let Some(s) = self.text_mut() {
                    s.pop();
                }
            }
        }
    }

    fn cycle(&mut self, options: usize, forward: bool) {
        let slot = match self.focus {
            Field::Assignee => &mut self.assignee,
            Field::Department => &mut self.department,
            _ => return,
        };
        if options == 0 {
            return;
        }
        *slot = Some(match (*slot, forward) {
            (None, true) => 0,
            (None, false) => options - 1,
            (Some(i), true) => (i + 1) % options,
            (Some(i), false) => (i + options - 1) % options,
        });
    }

    fn to_draft(&self, users: &[User], departments: &[String]) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            assigned_to: self
                .assignee
                .and_then(|i| users.get(i))
                .map(|u| u.id.clone())
                .unwrap_or_default(),
            department: self
                .department
                .and_then(|i| departments.get(i))
                .cloned()
                .unwrap_or_default(),
            due_date: parse_date(&self.due).ok(),
            // the field only ever holds digits that fit; cleared means zero
            reward: Some(self.reward.parse().unwrap_or(0)),
        }
    }
}

struct App {
    store: TaskStore,
    users: Vec<User>,
    departments: Vec<String>,
    log: Rc<NotificationLog>,
    toast: Option<Notification>,
    current_user: String,
    target_rewards: u64,
    upcoming_payout: String,
    leaderboard_limit: usize,
    default_reward: u32,
    tab: usize,
    list: ListState,
    form: Option<AddTaskForm>,
    today: NaiveDate,
}

impl App {
    fn new(cfg: &Config, seed: Seed, today: NaiveDate) -> Self {
        let log = Rc::new(NotificationLog::default());
        let mut store = crate::session_store(cfg, seed.tasks);
        store.subscribe(log.clone());

        let departments = departments(&seed.users)
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut list = ListState::default();
        list.select(Some(0));

        Self {
            store,
            users: seed.users,
            departments,
            log,
            toast: Some(Notification::welcome()),
            current_user: cfg.dashboard.current_user.clone(),
            target_rewards: cfg.dashboard.target_rewards,
            upcoming_payout: cfg.dashboard.upcoming_payout.clone(),
            leaderboard_limit: cfg.dashboard.leaderboard_limit,
            default_reward: cfg.tasks.default_reward,
            tab: 0,
            list,
            form: None,
            today,
        }
    }

    fn filter(&self) -> StatusFilter {
        StatusFilter::TABS[self.tab]
    }

    fn visible(&self) -> Vec<&Task> {
        self.filter().apply(self.store.tasks())
    }

    fn selected_task(&self) -> Option<&Task> {
        let i = self.list.selected()?;
        self.visible().get(i).copied()
    }

    fn clamp_selection(&mut self) {
        let n = self.visible().len();
        let sel = match (n, self.list.selected()) {
            (0, _) => None,
            (_, Some(i)) => Some(i.min(n - 1)),
            (_, None) => Some(0),
        };
        self.list.select(sel);
    }

    /// Pull whatever the store announced into the toast line.
    fn refresh_toast(&mut self) {
        if let Some(n) = self.log.drain().pop() {
            self.toast = Some(n);
        }
    }

    /// Apply a key press. Returns `true` when the session should end.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.form.is_some() {
            self.handle_form_key(code);
        } else {
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('a') => self.form = Some(AddTaskForm::new(self.default_reward)),
                KeyCode::Char('n') => self.toast = Some(Notification::new_task_available()),
                KeyCode::Right | KeyCode::Tab => {
                    self.tab = (self.tab + 1) % StatusFilter::TABS.len();
                }
                KeyCode::Left | KeyCode::BackTab => {
                    let n = StatusFilter::TABS.len();
                    self.tab = (self.tab + n - 1) % n;
                }
                KeyCode::Down => {
                    let n = self.visible().len();
                    if let Some(i) = self.list.selected() {
                        self.list.select(Some((i + 1).min(n.saturating_sub(1))));
                    }
                }
                KeyCode::Up => {
                    if let Some(i) = self.list.selected() {
                        self.list.select(Some(i.saturating_sub(1)));
                    }
                }
                KeyCode::Enter | KeyCode::Char('s') => self.advance_selected(),
                _ => {}
            }
        }
        self.clamp_selection();
        self.refresh_toast();
        false
    }

    fn advance_selected(&mut self) {
        let Some((id, next)) = self
            .selected_task()
            .and_then(|t| t.status.next().map(|next| (t.id.clone(), next)))
        else {
            return;
        };
        self.store.set_status_on(&id, next, self.today);
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let users = self.users.len();
        let depts = self.departments.len();
        let Some(form) = self.form.as_mut() else { return };

        match code {
            KeyCode::Esc => self.form = None,
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::Right => {
                let n = if form.focus == Field::Assignee { users } else { depts };
                form.cycle(n, true);
            }
            KeyCode::Left => {
                let n = if form.focus == Field::Assignee { users } else { depts };
                form.cycle(n, false);
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.type_char(c),
            KeyCode::Enter => {
                let draft = form.to_draft(&self.users, &self.departments);
                if self.store.submit(&draft).is_ok() {
                    self.form = None;
                    self.tab = 0;
                    self.list.select(Some(0));
                }
            }
            _ => {}
        }
    }
}

pub fn run_dashboard(cfg: &Config, seed: Seed) -> Result<()> {
    let mut app = App::new(cfg, seed, chrono::Local::now().date_naive());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn dashboard_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code) {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_navbar(f, rows[0], app);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);
    draw_rewards(f, top[0], app);
    draw_profile(f, top[1], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[2]);
    draw_tasks(f, main[0], app);
    draw_leaderboard(f, main[1], app);

    draw_toast(f, rows[3], app);

    if let Some(form) = &app.form {
        draw_form(f, form, app);
    }
}

fn draw_navbar(f: &mut Frame, area: Rect, app: &App) {
    let me = user_by_id(&app.users, &app.current_user)
        .map(|u| initials(&u.name))
        .unwrap_or_else(|| "?".to_string());
    let line = Line::from(vec![
        Span::styled(
            "TaskBoost",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Rewards Hub", Style::default().fg(Color::Gray)),
        Span::raw(concat!(
            "   a=add task  ←/→=tabs  ↑/↓=select",
            "  enter=start/complete  n=notifications  q=quit   ",
        )),
        Span::styled(format!("[{me}]"), Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_rewards(f: &mut Frame, area: Rect, app: &App) {
    let s = RewardsSummary::compute(
        &app.users,
        app.store.tasks(),
        app.target_rewards,
        app.upcoming_payout.clone(),
    );
    let block = Block::default().borders(Borders::ALL).title("Rewards Dashboard");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(format!(
            "Team rewards: ${}   Target: ${}",
            s.current_rewards, s.target_rewards
        )),
        parts[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Green))
            .percent(s.progress_percent.min(100) as u16),
        parts[1],
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::raw(format!("Next payout: {}", s.upcoming_payout)),
            Line::raw(format!("Employees: {}", s.total_employees)),
            Line::raw(format!("Avg. completion: {} tasks", s.average_completion)),
        ]),
        parts[2],
    );
}

fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Your Profile");
    let text = match user_by_id(&app.users, &app.current_user) {
        Some(user) => {
            let p = ProfileSummary::compute(user, app.store.tasks());
            Text::from(vec![
                Line::from(Span::styled(
                    format!("{} ({})", p.name, p.initials),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::raw(format!("{} • {}", p.role, p.department)),
                Line::raw(format!("Task completion: {}%", p.completion_rate)),
                Line::raw(format!(
                    "Earned: ${}   Completed: {}",
                    p.ledger_total_reward, p.ledger_completed_tasks
                )),
                Line::raw(format!(
                    "Open {} · In progress {} · Completed {}",
                    p.counts.open, p.counts.in_progress, p.counts.completed
                )),
                Line::raw(format!("This month: ${} in bonuses", p.bonuses_earned)),
            ])
        }
        None => Text::raw(format!("Unknown user '{}'", app.current_user)),
    };
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}

fn tab_title(filter: StatusFilter, counts: StatusCounts) -> Line<'static> {
    match filter {
        StatusFilter::All => Line::raw("All Tasks"),
        StatusFilter::Only(status) => Line::raw(format!(
            "{} ({})",
            match status {
                TaskStatus::InProgress => "In Progress".to_string(),
                other => status_label(other),
            },
            counts.get(status)
        )),
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Open => Color::Blue,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Completed => Color::Green,
    }
}

fn draw_tasks(f: &mut Frame, area: Rect, app: &mut App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let counts = status_counts(app.store.tasks());
    let titles: Vec<Line> = StatusFilter::TABS
        .iter()
        .map(|t| tab_title(*t, counts))
        .collect();
    f.render_widget(
        Tabs::new(titles)
            .select(app.tab)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)),
        parts[0],
    );

    let items: Vec<ListItem> = app
        .visible()
        .into_iter()
        .map(|t| {
            let who = user_by_id(&app.users, &t.assigned_to)
                .map(|u| initials(&u.name))
                .unwrap_or_default();
            let action = match t.status {
                TaskStatus::Open => "  [Start Task]",
                TaskStatus::InProgress => "  [Complete Task]",
                TaskStatus::Completed => "",
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:<12}", status_label(t.status)),
                        Style::default().fg(status_color(t.status)),
                    ),
                    Span::styled(t.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  ${}", t.reward), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::raw("            "),
                    Span::styled(
                        format!("{} · {} · {}", t.department, due_label(t, app.today), who),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(action, Style::default().fg(Color::Cyan)),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, parts[1], &mut app.list);
}

fn draw_leaderboard(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = leaderboard(&app.users, app.leaderboard_limit)
        .into_iter()
        .map(|e| {
            Line::from(vec![
                Span::styled(format!("{:>2}. ", e.rank), Style::default().fg(Color::Gray)),
                Span::raw(format!("{} ", e.name)),
                Span::styled(format!("${}", e.total_reward), Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Top Performers")),
        area,
    );
}

fn draw_toast(f: &mut Frame, area: Rect, app: &App) {
    let line = match &app.toast {
        Some(n) => {
            let color = match n.tone {
                Tone::Default => Color::Green,
                Tone::Destructive => Color::Red,
            };
            Line::from(vec![
                Span::styled(
                    format!("{}: ", n.title),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(n.description.clone()),
            ])
        }
        None => Line::raw(""),
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn draw_form(f: &mut Frame, form: &AddTaskForm, app: &App) {
    let area = centered(f.area(), 64, 18);
    f.render_widget(Clear, area);

    let value = |field: Field| -> String {
        match field {
            Field::Title => form.title.clone(),
            Field::Description => form.description.clone(),
            Field::Assignee => form
                .assignee
                .and_then(|i| app.users.get(i))
                .map(|u| format!("◂ {} ▸", u.name))
                .unwrap_or_else(|| "◂ Select team member ▸".to_string()),
            Field::Department => form
                .department
                .and_then(|i| app.departments.get(i))
                .map(|d| format!("◂ {d} ▸"))
                .unwrap_or_else(|| "◂ Select department ▸".to_string()),
            Field::Due => form.due.clone(),
            Field::Reward => form.reward.clone(),
        }
    };

    let mut lines = vec![
        Line::raw("Add a new task to assign to your team members."),
        Line::raw(""),
    ];
    for field in Field::ORDER {
        let style = if field == form.focus {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(field.label(), style)));
        lines.push(Line::raw(format!("  {}", value(field))));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "tab=next field  ←/→=choose  enter=create  esc=cancel",
        Style::default().fg(Color::Gray),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL).title("Create New Task")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            &Config::default(),
            Seed::mock(),
            NaiveDate::from_ymd_opt(2025, 4, 20).unwrap(),
        )
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn enter_advances_selected_task() {
        let mut app = app();
        assert_eq!(app.toast.as_ref().unwrap().title, "Welcome to TaskBoost!");

        // first task is open
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.store.get("1").unwrap().status, TaskStatus::InProgress);
        assert_eq!(app.toast.as_ref().unwrap().title, "Task Started");

        app.handle_key(KeyCode::Enter);
        let t = app.store.get("1").unwrap();
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.completed_on, NaiveDate::from_ymd_opt(2025, 4, 20));

        // completed tasks have no further action
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.store.get("1").unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn tabs_filter_and_selection_stays_in_range() {
        let mut app = app();
        app.list.select(Some(7));
        app.handle_key(KeyCode::Left); // wraps to "Completed"
        assert_eq!(app.filter(), StatusFilter::Only(TaskStatus::Completed));
        assert_eq!(app.visible().len(), 2);
        assert_eq!(app.list.selected(), Some(1));
    }

    #[test]
    fn incomplete_form_keeps_modal_open() {
        let mut app = app();
        app.handle_key(KeyCode::Char('a'));
        type_str(&mut app, "Audit logs");
        app.handle_key(KeyCode::Enter);

        assert!(app.form.is_some());
        assert_eq!(app.store.len(), 8);
        assert_eq!(app.toast.as_ref().unwrap().title, "Missing Information");
    }

    /// Open the modal and fill every required field, leaving focus on Reward.
    fn fill_form(app: &mut App) {
        app.handle_key(KeyCode::Char('a'));
        type_str(app, "Audit logs");
        app.handle_key(KeyCode::Tab);
        type_str(app, "Quarterly audit");
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Right); // Alex Chen
        app.handle_key(KeyCode::Tab);
        app.handle_key(KeyCode::Right); // Engineering
        app.handle_key(KeyCode::Tab);
        type_str(app, "2025-06-01");
        app.handle_key(KeyCode::Tab);
    }

    #[test]
    fn complete_form_adds_task_first() {
        let mut app = app();
        fill_form(&mut app);
        type_str(&mut app, "-x"); // ignored, reward stays at the default
        app.handle_key(KeyCode::Enter);

        assert!(app.form.is_none());
        let first = &app.store.tasks()[0];
        assert_eq!(first.title, "Audit logs");
        assert_eq!(first.assigned_to, "1");
        assert_eq!(first.department, "Engineering");
        assert_eq!(first.reward, 50);
        assert_eq!(app.toast.as_ref().unwrap().title, "Task Added");
    }

    #[test]
    fn typed_reward_stops_at_u32_range() {
        let mut app = app();
        fill_form(&mut app);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        type_str(&mut app, "5000000000000");
        assert_eq!(app.form.as_ref().unwrap().reward, "500000000");

        app.handle_key(KeyCode::Enter);
        assert!(app.form.is_none());
        assert_eq!(app.store.tasks()[0].reward, 500_000_000);
    }

    #[test]
    fn cleared_reward_is_zero_not_default() {
        let mut app = app();
        fill_form(&mut app);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Enter);

        assert!(app.form.is_none());
        assert_eq!(app.store.tasks()[0].reward, 0);
    }
}
