use std::{fmt::Display, io::Write};

use crate::{
    error::Error,
    model::{tool::ToolDto, workflow::WorkflowDto},
};

/// Writes command output to the caller-supplied stream.
pub struct Output<'a> {
    out: &'a mut (dyn Write + Send),
    script: bool,
}

impl<'a> Output<'a> {
    pub fn new(out: &'a mut (dyn Write + Send), script: bool) -> Self {
        Self { out, script }
    }

    pub fn println(&mut self, line: impl Display) -> Result<(), Error> {
        writeln!(self.out, "{line}").map_err(|e| Error::io("Could not write output", e))
    }

    /// Prints a line meant for people; suppressed with `--script`.
    pub fn hint(&mut self, line: impl Display) -> Result<(), Error> {
        if self.script {
            return Ok(());
        }
        self.println(line)
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.out
            .write_all(bytes)
            .map_err(|e| Error::io("Could not write output", e))
    }

    pub fn tools(&mut self, tools: &[ToolDto]) -> Result<(), Error> {
        self.hint(format_args!(
            "{:<60}{:<60}{}",
            "NAME", "GIT REPO", "ON DOCKSTORE?"
        ))?;
        for tool in tools {
            self.println(format_args!(
                "{:<60}{:<60}{}",
                tool.tool_path,
                tool.git_url,
                yes_no(tool.is_published)
            ))?;
        }
        Ok(())
    }

    pub fn tool(&mut self, tool: &ToolDto) -> Result<(), Error> {
        self.println(format_args!("TOOL: {}", tool.tool_path))?;
        self.println(format_args!("MODE: {}", tool.mode))?;
        self.println(format_args!("GIT REPO: {}", tool.git_url))?;
        self.println(format_args!("PUBLISHED: {}", yes_no(tool.is_published)))?;
        if let Some(topic) = &tool.topic {
            self.println(format_args!("TOPIC: {topic}"))?;
        }
        self.println("TAGS:")?;
        for tag in tool.tags.iter().filter(|tag| !tag.hidden) {
            self.println(format_args!(
                "  {} ({}){}",
                tag.name,
                tag.reference,
                if tag.valid { "" } else { " [invalid]" }
            ))?;
        }
        Ok(())
    }

    pub fn workflows(&mut self, workflows: &[WorkflowDto]) -> Result<(), Error> {
        self.hint(format_args!(
            "{:<70}{:<20}{}",
            "NAME", "DESCRIPTOR", "ON DOCKSTORE?"
        ))?;
        for workflow in workflows {
            self.println(format_args!(
                "{:<70}{:<20}{}",
                workflow.full_workflow_path,
                workflow.descriptor_type,
                yes_no(workflow.is_published)
            ))?;
        }
        Ok(())
    }

    pub fn workflow(&mut self, workflow: &WorkflowDto) -> Result<(), Error> {
        self.println(format_args!("WORKFLOW: {}", workflow.full_workflow_path))?;
        self.println(format_args!("DESCRIPTOR: {}", workflow.descriptor_type))?;
        self.println(format_args!("PUBLISHED: {}", yes_no(workflow.is_published)))?;
        if let Some(topic) = &workflow.topic {
            self.println(format_args!("TOPIC: {topic}"))?;
        }
        self.println("VERSIONS:")?;
        for version in workflow.versions.iter().filter(|version| !version.hidden) {
            self.println(format_args!(
                "  {} ({}){}",
                version.name,
                version.workflow_path,
                if version.valid { "" } else { " [invalid]" }
            ))?;
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}
