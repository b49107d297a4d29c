//! Request payloads sent to the Confluence REST API.

use serde::Serialize;

use crate::consts::STORAGE_REPRESENTATION;

#[derive(Debug, Serialize)]
pub(crate) struct Storage<'a> {
  pub value: &'a str,
  pub representation: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Body<'a> {
  pub storage: Storage<'a>,
}

impl<'a> Body<'a> {
  pub fn storage(value: &'a str) -> Self {
    Self {
      storage: Storage {
        value,
        representation: STORAGE_REPRESENTATION,
      },
    }
  }
}

#[derive(Debug, Serialize)]
pub(crate) struct SpaceRef<'a> {
  pub key: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Ancestor<'a> {
  pub id: &'a str,
}

/// Body of `POST /content` for a new page.
#[derive(Debug, Serialize)]
pub(crate) struct NewPage<'a> {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub title: &'a str,
  pub space: SpaceRef<'a>,
  pub body: Body<'a>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub ancestors: Vec<Ancestor<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Version<'a> {
  pub number: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<&'a str>,
}

/// Body of `PUT /content/{id}`.
#[derive(Debug, Serialize)]
pub(crate) struct PageUpdate<'a> {
  pub id: &'a str,
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub title: &'a str,
  pub body: Body<'a>,
  pub version: Version<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Container<'a> {
  pub id: &'a str,
  #[serde(rename = "type")]
  pub kind: &'static str,
}

/// Body of `POST /content` for a page comment.
#[derive(Debug, Serialize)]
pub(crate) struct NewComment<'a> {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub container: Container<'a>,
  pub body: Body<'a>,
}
