use keyhole::jvm::{ClassFile, Error};

/// Prints an overview of a class file to stdout
pub struct ClassPrinter<'a> {
    class: &'a ClassFile,
}

impl<'a> ClassPrinter<'a> {
    pub fn new(class: &'a ClassFile) -> Self {
        Self { class }
    }

    /// Print all class information. Nothing is printed if a name cannot be resolved.
    pub fn print(&self) -> Result<(), Error> {
        let lines = self.lines()?;
        for line in lines {
            println!("{line}");
        }
        Ok(())
    }

    fn lines(&self) -> Result<Vec<String>, Error> {
        let class = self.class;
        let pool = &class.constant_pool;
        let mut lines = vec![
            "Class File Overview:".to_owned(),
            format!(
                "  Name         - {} ({})",
                class.class_name()?,
                class.super_class_name()?
            ),
            format!(
                "  Version      - {} (Java {})",
                class.version,
                class.version.java_release()
            ),
            format!("  Access Flags - {:#06X}", class.access_flags.bits()),
        ];

        if !pool.is_empty() {
            lines.push("Constant Pool Entries:".to_owned());
            lines.extend(
                pool.iter()
                    .map(|(index, entry)| format!("  {index:>2}#: [{}]", entry.kind())),
            );
        }

        if !class.methods.is_empty() {
            lines.push("Available Methods:".to_owned());
            for method in &class.methods {
                lines.push(format!(
                    "  {}{}",
                    method.name(pool)?,
                    method.descriptor(pool)?
                ));
            }
        }

        if !class.attributes.is_empty() {
            lines.push("Assigned Attributes:".to_owned());
            for attribute in &class.attributes {
                lines.push(format!("  {}", attribute.name(pool)?));
            }
        }

        Ok(lines)
    }
}
