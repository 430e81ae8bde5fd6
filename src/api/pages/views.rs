//! HTML rendering for the teacher pages.
//!
//! Plain string building; every value coming from the database or the
//! request goes through [`escape`].

use std::fmt::Write;

use crate::db::Teacher;

/// Values shown in the new/edit form. Kept as raw strings so a rejected
/// submission is re-rendered exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub teacher_id: String,
    pub first_name: String,
    pub last_name: String,
    pub employee_number: String,
    pub hire_date: String,
    pub salary: String,
}

impl From<&Teacher> for FormValues {
    fn from(t: &Teacher) -> Self {
        Self {
            teacher_id: t.id.to_string(),
            first_name: t.first_name.clone(),
            last_name: t.last_name.clone(),
            employee_number: t.employee_number.clone(),
            hire_date: t.hire_date.format("%Y-%m-%d").to_string(),
            salary: t.salary.clone(),
        }
    }
}

/// Which form is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit,
}

impl FormMode {
    fn title(self) -> &'static str {
        match self {
            FormMode::New => "New Teacher",
            FormMode::Edit => "Edit Teacher",
        }
    }

    fn action(self) -> &'static str {
        match self {
            FormMode::New => "/Teacher/Add",
            FormMode::Edit => "/Teacher/Update",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            FormMode::New => "Add Teacher",
            FormMode::Edit => "Save Changes",
        }
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <nav><a href=\"/Teacher/List\">Teachers</a> | <a href=\"/Teacher/New\">New Teacher</a></nav>\n\
         <main>\n<h1>{title}</h1>\n{body}</main>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body
    )
}

pub fn list_page(teachers: &[Teacher]) -> String {
    let mut body = String::new();

    if teachers.is_empty() {
        body.push_str("<p>No teachers yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>Name</th><th>Employee Number</th><th>Hire Date</th><th>Salary</th><th></th></tr></thead>\n<tbody>\n",
        );
        for t in teachers {
            let _ = writeln!(
                body,
                "<tr><td><a href=\"/Teacher/Show/{id}\">{first} {last}</a></td><td>{number}</td><td>{hired}</td><td>{salary}</td>\
                 <td><a href=\"/Teacher/Edit/{id}\">Edit</a> <a href=\"/Teacher/DeleteConfirm/{id}\">Delete</a></td></tr>",
                id = t.id,
                first = escape(&t.first_name),
                last = escape(&t.last_name),
                number = escape(&t.employee_number),
                hired = t.hire_date.format("%Y-%m-%d"),
                salary = escape(&t.salary),
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout("Teachers", &body)
}

fn details(teacher: &Teacher) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<dl>\n\
         <dt>Employee Number</dt><dd>{number}</dd>\n\
         <dt>Hire Date</dt><dd>{hired}</dd>\n\
         <dt>Salary</dt><dd>{salary}</dd>\n\
         </dl>\n",
        number = escape(&teacher.employee_number),
        hired = teacher.hire_date.format("%Y-%m-%d"),
        salary = escape(&teacher.salary),
    );
    out
}

fn full_name(teacher: &Teacher) -> String {
    format!("{} {}", teacher.first_name, teacher.last_name)
}

pub fn show_page(teacher: &Teacher) -> String {
    let mut body = details(teacher);

    body.push_str("<h2>Courses</h2>\n");
    if teacher.course_names.is_empty() {
        body.push_str("<p>No courses assigned.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for course in &teacher.course_names {
            let _ = writeln!(body, "<li>{}</li>", escape(course));
        }
        body.push_str("</ul>\n");
    }

    let _ = writeln!(
        body,
        "<p><a href=\"/Teacher/Edit/{id}\">Edit</a> | <a href=\"/Teacher/DeleteConfirm/{id}\">Delete</a></p>",
        id = teacher.id
    );

    layout(&full_name(teacher), &body)
}

pub fn form_page(mode: FormMode, values: &FormValues, error: Option<&str>) -> String {
    let mut body = String::new();

    if let Some(message) = error {
        let _ = writeln!(body, "<p class=\"error\" role=\"alert\">{}</p>", escape(message));
    }

    let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", mode.action());
    if mode == FormMode::Edit {
        let _ = writeln!(
            body,
            "<input type=\"hidden\" name=\"teacherId\" value=\"{}\">",
            escape(&values.teacher_id)
        );
    }

    let fields = [
        ("teacherFName", "First Name", "text", &values.first_name),
        ("teacherLName", "Last Name", "text", &values.last_name),
        ("employeeNumber", "Employee Number", "text", &values.employee_number),
        ("hireDate", "Hire Date", "date", &values.hire_date),
        ("salary", "Salary", "text", &values.salary),
    ];
    for (name, label, kind, value) in fields {
        let _ = writeln!(
            body,
            "<p><label for=\"{name}\">{label}</label> <input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{value}\"></p>",
            value = escape(value),
        );
    }

    let _ = writeln!(
        body,
        "<p><button type=\"submit\">{}</button></p>\n</form>",
        mode.submit_label()
    );

    layout(mode.title(), &body)
}

pub fn delete_confirm_page(teacher: &Teacher) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<p>Are you sure you want to delete {}?</p>",
        escape(&full_name(teacher))
    );
    body.push_str(&details(teacher));
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/Teacher/Delete\">\n\
         <input type=\"hidden\" name=\"teacherId\" value=\"{id}\">\n\
         <button type=\"submit\">Delete</button> <a href=\"/Teacher/Show/{id}\">Cancel</a>\n\
         </form>",
        id = teacher.id
    );

    layout("Delete Teacher", &body)
}

/// Page for a failed request (not found, bad input, storage failure).
pub fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/Teacher/List\">Back to teachers</a></p>\n",
        escape(message)
    );
    layout(title, &body)
}
