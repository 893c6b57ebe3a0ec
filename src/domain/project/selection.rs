//! Control panel checkbox state.
//!
//! Expired projects are listed in two groups: those ready to be funded and
//! those to be refunded. Each group has its own "select all" box.

use crate::shared::{OperationType, ProjectId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkbox {
    pub project_id: ProjectId,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSelection {
    fund: Vec<Checkbox>,
    refund: Vec<Checkbox>,
}

impl ProjectSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unchecked box. Adding an id already in the group is a no-op.
    pub fn add(&mut self, group: OperationType, project_id: impl Into<ProjectId>) {
        let project_id = project_id.into();
        let boxes = self.group_mut(group);
        if !boxes.iter().any(|b| b.project_id == project_id) {
            boxes.push(Checkbox {
                project_id,
                checked: false,
            });
        }
    }

    /// Returns `false` if the id is not in the group.
    pub fn set_checked(&mut self, group: OperationType, project_id: &ProjectId, checked: bool) -> bool {
        match self.find_mut(group, project_id) {
            Some(b) => {
                b.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Flip one box. Returns its new state, or `None` if the id is unknown.
    pub fn toggle(&mut self, group: OperationType, project_id: &ProjectId) -> Option<bool> {
        let b = self.find_mut(group, project_id)?;
        b.checked = !b.checked;
        Some(b.checked)
    }

    /// The "select all" box: check everything unless everything is already
    /// checked, in which case uncheck everything. Returns the new state.
    pub fn toggle_all(&mut self, group: OperationType) -> bool {
        let boxes = self.group_mut(group);
        let check = boxes.iter().any(|b| !b.checked);
        for b in boxes.iter_mut() {
            b.checked = check;
        }
        check
    }

    /// Checked ids of the group, in the order they were added.
    pub fn selected(&self, group: OperationType) -> Vec<ProjectId> {
        self.group(group)
            .iter()
            .filter(|b| b.checked)
            .map(|b| b.project_id.clone())
            .collect()
    }

    pub fn boxes(&self, group: OperationType) -> &[Checkbox] {
        self.group(group)
    }

    /// Uncheck every box in both groups.
    pub fn clear(&mut self) {
        for b in self.fund.iter_mut().chain(self.refund.iter_mut()) {
            b.checked = false;
        }
    }

    fn group(&self, group: OperationType) -> &[Checkbox] {
        match group {
            OperationType::Fund => &self.fund,
            OperationType::Refund => &self.refund,
        }
    }

    fn group_mut(&mut self, group: OperationType) -> &mut Vec<Checkbox> {
        match group {
            OperationType::Fund => &mut self.fund,
            OperationType::Refund => &mut self.refund,
        }
    }

    fn find_mut(&mut self, group: OperationType, project_id: &ProjectId) -> Option<&mut Checkbox> {
        self.group_mut(group)
            .iter_mut()
            .find(|b| &b.project_id == project_id)
    }
}
