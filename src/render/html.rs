//! Default HTML output binding.
//!
//! Turns a [`LinkDescriptor`] into `<a>` markup. The decision logic is fully
//! contained in [`super::decide`]; this adapter only binds the descriptor to
//! one output shape and is swappable for other bindings.
//!
//! Local-open metadata is carried as `data-openfile-*` attributes for a
//! client-side open handler; the href stays in place as a fallback target.

use std::fmt;

use crate::utils::html::{escape, escape_attr};

use super::decide::{LinkDescriptor, LinkLabel, LinkTarget};

/// Write the `<a>` markup for a link descriptor.
pub fn write_link(out: &mut dyn fmt::Write, link: &LinkDescriptor) -> fmt::Result {
    out.write_str("<a")?;
    if let Some(id) = &link.id {
        write!(out, " id=\"{}\"", escape_attr(id))?;
    }
    if let Some(class) = &link.css_class {
        write!(out, " class=\"{}\"", escape_attr(class))?;
    }
    write!(out, " href=\"{}\"", escape_attr(link.target.href()))?;
    if let LinkTarget::LocalOpen {
        domain,
        book_path,
        resource_path,
        ..
    } = &link.target
    {
        write!(out, " data-openfile-domain=\"{}\"", escape_attr(domain))?;
        write!(out, " data-openfile-book=\"{}\"", escape_attr(book_path))?;
        write!(out, " data-openfile-path=\"{}\"", escape_attr(resource_path))?;
    }
    out.write_str(">")?;
    match &link.label {
        // Caller body is already rendered content
        LinkLabel::Body(body) => out.write_str(body)?,
        LinkLabel::Filename(name) => out.write_str(&escape(name))?,
    }
    out.write_str("</a>")?;
    if let Some(size) = &link.size {
        write!(out, " ({})", escape(size))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(link: &LinkDescriptor) -> String {
        let mut out = String::new();
        write_link(&mut out, link).unwrap();
        out
    }

    fn plain(href: &str) -> LinkDescriptor {
        LinkDescriptor {
            target: LinkTarget::Plain {
                href: href.to_string(),
            },
            id: None,
            css_class: None,
            label: LinkLabel::Filename("a.txt".into()),
            size: None,
        }
    }

    #[test]
    fn test_minimal_link() {
        assert_eq!(render(&plain("/a.txt")), r#"<a href="/a.txt">a.txt</a>"#);
    }

    #[test]
    fn test_full_attributes_and_size() {
        let link = LinkDescriptor {
            id: Some("page-dl".into()),
            css_class: Some("file-link".into()),
            size: Some("4.2 KiB".into()),
            ..plain("/a.txt")
        };
        assert_eq!(
            render(&link),
            r#"<a id="page-dl" class="file-link" href="/a.txt">a.txt</a> (4.2 KiB)"#
        );
    }

    #[test]
    fn test_local_open_data_attributes() {
        let link = LinkDescriptor {
            target: LinkTarget::LocalOpen {
                href: "file:///tmp/a.txt".into(),
                domain: "example.com".into(),
                book_path: "/docs".into(),
                resource_path: "/a.txt".into(),
            },
            ..plain("/unused")
        };
        assert_eq!(
            render(&link),
            "<a href=\"file:///tmp/a.txt\" data-openfile-domain=\"example.com\" \
             data-openfile-book=\"/docs\" data-openfile-path=\"/a.txt\">a.txt</a>"
        );
    }

    #[test]
    fn test_filename_escaped_body_verbatim() {
        let link = LinkDescriptor {
            label: LinkLabel::Filename("a<b>.txt".into()),
            ..plain("/x")
        };
        assert!(render(&link).contains("a&lt;b&gt;.txt"));

        let link = LinkDescriptor {
            label: LinkLabel::Body("<em>manual</em>".into()),
            ..plain("/x")
        };
        assert!(render(&link).contains("<em>manual</em>"));
    }
}
