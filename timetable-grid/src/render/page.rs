use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::grid::TimeGrid;
use super::style::stylesheet;
use crate::session::{DayOfWeek, SessionType};

/// Standalone HTML document around a rendered grid
///
/// Editable pages also carry the admin login bar, the session form dialog
/// and the script that wires grid affordances to the JSON API.
pub fn render_page(title: &str, grid: &TimeGrid<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(stylesheet())) }
            }
            body {
                h1 { (title) }
                @if !grid.is_read_only() {
                    (admin_bar())
                }
                (grid.render())
                @if !grid.is_read_only() {
                    (session_form())
                    script { (PreEscaped(ACTIONS_JS)) }
                }
            }
        }
    }
}

fn admin_bar() -> Markup {
    html! {
        form #admin-login .admin-bar {
            label for="admin-password" { "Admin password" }
            input #admin-password type="password" name="password" autocomplete="current-password";
            button type="submit" { "Log in" }
            button #admin-logout type="button" hidden { "Log out" }
            span #admin-status {}
        }
    }
}

fn session_form() -> Markup {
    html! {
        dialog #session-form {
            form method="dialog" {
                h2 #session-form-title { "Session" }
                label { "Id " input name="id" required; }
                label {
                    "Day "
                    select name="dayOfWeek" {
                        @for day in DayOfWeek::ALL {
                            option value=(day.as_str()) { (day.label()) }
                        }
                    }
                }
                label { "Start " input name="startTime" type="time" required; }
                label { "End " input name="endTime" type="time" required; }
                label { "Subject code " input name="subjectCode" required; }
                label { "Subject name " input name="subjectName" required; }
                label { "Teacher first name " input name="teacherFirstName" required; }
                label { "Teacher last name " input name="teacherLastName" required; }
                label { "Room " input name="roomCode" required; }
                label {
                    "Type "
                    select name="sessionType" {
                        @for kind in SessionType::ALL {
                            option value=(kind.as_str()) { (kind.label()) }
                        }
                    }
                }
                label { input name="isCancelled" type="checkbox"; " Cancelled" }
                label { "Reason " input name="cancellationReason"; }
                p #session-form-error .form-error {}
                menu {
                    button value="cancel" formnovalidate { "Cancel" }
                    button #session-form-save value="save" { "Save" }
                }
            }
        }
    }
}

// Talks to the JSON API of the embedding server. The admin password lives in
// sessionStorage after a successful /api/login.
const ACTIONS_JS: &str = r#"
const loginForm = document.getElementById('admin-login');
const logoutButton = document.getElementById('admin-logout');
const statusLabel = document.getElementById('admin-status');
const dialog = document.getElementById('session-form');
const form = dialog.querySelector('form');

function storedPassword() { return sessionStorage.getItem('adminPassword'); }

function refreshLogin() {
  const loggedIn = storedPassword() !== null;
  statusLabel.textContent = loggedIn ? 'Logged in' : '';
  logoutButton.hidden = !loggedIn;
}

async function login(password) {
  const response = await fetch('/api/login', {
    method: 'POST', headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ password }),
  });
  if (!response.ok) {
    sessionStorage.removeItem('adminPassword');
    statusLabel.textContent = 'Wrong password';
    return false;
  }
  sessionStorage.setItem('adminPassword', password);
  refreshLogin();
  return true;
}

async function ensureLogin() {
  if (storedPassword() !== null) return true;
  const password = prompt('Admin password');
  return password !== null && login(password);
}

function adminHeaders() {
  return { 'Content-Type': 'application/json', 'X-Admin-Password': storedPassword() || '' };
}

async function errorText(response) {
  try { return (await response.json()).error || response.statusText; } catch { return response.statusText; }
}

function openForm(session, existingId) {
  form.reset();
  form.dataset.existingId = existingId || '';
  document.getElementById('session-form-title').textContent = existingId ? 'Edit session' : 'New session';
  document.getElementById('session-form-error').textContent = '';
  form.elements.id.readOnly = Boolean(existingId);
  form.elements.id.value = session.id || '';
  form.elements.dayOfWeek.value = session.dayOfWeek;
  form.elements.startTime.value = session.startTime;
  form.elements.endTime.value = session.endTime;
  form.elements.subjectCode.value = session.subject ? session.subject.code : '';
  form.elements.subjectName.value = session.subject ? session.subject.name : '';
  form.elements.teacherFirstName.value = session.teacher ? session.teacher.firstName : '';
  form.elements.teacherLastName.value = session.teacher ? session.teacher.lastName : '';
  form.elements.roomCode.value = session.room ? session.room.code : '';
  form.elements.sessionType.value = session.sessionType || 'lecture';
  form.elements.isCancelled.checked = Boolean(session.isCancelled);
  form.elements.cancellationReason.value = session.cancellationReason || '';
  dialog.showModal();
}

function formSession() {
  const f = form.elements;
  const session = {
    id: f.id.value.trim(),
    dayOfWeek: f.dayOfWeek.value,
    startTime: f.startTime.value,
    endTime: f.endTime.value,
    subject: { code: f.subjectCode.value.trim(), name: f.subjectName.value.trim() },
    teacher: { firstName: f.teacherFirstName.value.trim(), lastName: f.teacherLastName.value.trim() },
    room: { code: f.roomCode.value.trim() },
    sessionType: f.sessionType.value,
    isCancelled: f.isCancelled.checked,
  };
  const reason = f.cancellationReason.value.trim();
  if (reason) session.cancellationReason = reason;
  return session;
}

loginForm.addEventListener('submit', async (event) => {
  event.preventDefault();
  const input = document.getElementById('admin-password');
  if (await login(input.value)) input.value = '';
});

logoutButton.addEventListener('click', () => {
  sessionStorage.removeItem('adminPassword');
  refreshLogin();
});

document.getElementById('session-form-save').addEventListener('click', async (event) => {
  event.preventDefault();
  if (!form.reportValidity() || !(await ensureLogin())) return;
  const existingId = form.dataset.existingId;
  const url = existingId ? `/api/sessions/${encodeURIComponent(existingId)}` : '/api/sessions';
  const response = await fetch(url, {
    method: existingId ? 'PUT' : 'POST', headers: adminHeaders(),
    body: JSON.stringify(formSession()),
  });
  if (response.ok) { location.reload(); return; }
  if (response.status === 401) sessionStorage.removeItem('adminPassword');
  document.getElementById('session-form-error').textContent = await errorText(response);
});

document.addEventListener('click', async (event) => {
  const target = event.target.closest('[data-action]');
  if (!target) return;
  const action = target.dataset.action;
  const id = target.dataset.sessionId;
  if (action === 'slot-click') {
    const response = await fetch('/api/grid/slot-click', {
      method: 'POST', headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ day: target.dataset.day, startTime: target.dataset.start }),
    });
    if (response.ok) openForm(await response.json(), null);
    else alert(await errorText(response));
  } else if (action === 'edit') {
    const response = await fetch(`/api/sessions/${encodeURIComponent(id)}`);
    if (response.ok) openForm(await response.json(), id);
    else alert(await errorText(response));
  } else if (action === 'delete') {
    if (!(await ensureLogin()) || !confirm('Delete this session?')) return;
    const response = await fetch(`/api/sessions/${encodeURIComponent(id)}/delete`, { method: 'POST', headers: adminHeaders() });
    if (response.ok) { location.reload(); return; }
    if (response.status === 401) { sessionStorage.removeItem('adminPassword'); refreshLogin(); }
    alert(await errorText(response));
  }
});

refreshLogin();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;

    #[test]
    fn page_embeds_styles_and_grid() {
        let config = GridConfig::default();
        let grid = TimeGrid::new(&[], &config);
        let page = render_page("Group L2-A", &grid).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Group L2-A</title>"));
        assert!(page.contains(".session-lecture {"));
        assert!(page.contains("timetable-grid"));
        assert!(page.contains("/api/grid/slot-click"));
    }

    #[test]
    fn editable_page_has_login_and_session_form() {
        let config = GridConfig::default();
        let grid = TimeGrid::new(&[], &config);
        let page = render_page("Week", &grid).into_string();

        assert!(page.contains("id=\"admin-login\""));
        assert!(page.contains("id=\"session-form\""));
        assert!(page.contains("<option value=\"sunday\">Sunday</option>"));
        assert!(page.contains("<option value=\"makeup\">"));
        assert!(page.contains("fetch('/api/login'"));
        assert!(page.contains("sessionStorage.setItem('adminPassword'"));
        assert!(page.contains("method: existingId ? 'PUT' : 'POST'"));
        assert!(!page.contains("CustomEvent"));
    }

    #[test]
    fn read_only_page_has_no_script() {
        let config = GridConfig::default();
        let grid = TimeGrid::new(&[], &config).read_only(true);
        let page = render_page("Week", &grid).into_string();
        assert!(!page.contains("<script>"));
        assert!(!page.contains("admin-login"));
        assert!(!page.contains("session-form"));
    }
}
