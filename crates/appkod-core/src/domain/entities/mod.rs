pub mod blueprint;

pub use blueprint::{
    Api, Auth, Blueprint, Component, Connector, Database, Deploy, Endpoint, EndpointRequest, Field,
    FieldReference, Index, Migrations, Page, RateLimit, Record, Role, Seo, StringMap, Table, Theme,
    Ui, Workflow, WorkflowStep,
};
