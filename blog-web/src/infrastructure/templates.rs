use tera::{Context, Tera};

/// Page templates compiled into the binary, so rendering never depends on the
/// working directory.
const TEMPLATES: [(&str, &str); 6] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("register.html", include_str!("../../templates/register.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
    ("new_post.html", include_str!("../../templates/new_post.html")),
];

pub(crate) struct Templates {
    tera: Tera,
}

impl Templates {
    pub(crate) fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub(crate) fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}

#[cfg(test)]
mod tests {
    use tera::Context;

    use super::Templates;

    #[test]
    fn all_pages_render_with_empty_data() {
        let templates = Templates::load().expect("templates must parse");

        let mut context = Context::new();
        context.insert("posts", &Vec::<String>::new());
        context.insert("user_name", "Ana");

        for name in ["index.html", "register.html", "login.html", "dashboard.html", "new_post.html"] {
            templates
                .render(name, &context)
                .unwrap_or_else(|err| panic!("{name} must render: {err}"));
        }
    }

    #[test]
    fn user_content_is_escaped() {
        let templates = Templates::load().expect("templates must parse");

        let mut context = Context::new();
        context.insert("posts", &Vec::<String>::new());
        context.insert("user_name", "<script>alert(1)</script>");

        let html = templates
            .render("dashboard.html", &context)
            .expect("dashboard must render");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
