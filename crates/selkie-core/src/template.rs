use crate::detect::DiagramType;

/// Default example source for a diagram type, shown when the user switches
/// types without having customized the editor content. Total over
/// [`DiagramType`].
pub fn default_source(diagram_type: DiagramType) -> &'static str {
    match diagram_type {
        DiagramType::Flowchart => FLOWCHART,
        DiagramType::Sequence => SEQUENCE,
        DiagramType::Gantt => GANTT,
        DiagramType::Class => CLASS,
        DiagramType::State => STATE,
        DiagramType::Pie => PIE,
        DiagramType::Er => ER,
        DiagramType::Journey => JOURNEY,
        DiagramType::Requirement => REQUIREMENT,
        DiagramType::Git => GIT,
        DiagramType::C4 => C4,
    }
}

pub const FLOWCHART: &str = r#"graph TD
    A[Patient Logs into System] --> B{Upload New Data?}
    B -- Yes --> C[Patient Uploads Data to Database]
    B -- No --> D{Edit Existing Data?}
    D -- Yes --> E[Patient Edits Data in Database]
    D -- No --> F{View Data?}
    F -- Yes --> G[Patient Reads Data from Database]
    F -- No --> H{Share Data with Doctor?}
    H -- Yes --> I[Patient Provides Access to Doctor]
    H -- No --> J[No Action]
"#;

const SEQUENCE: &str = r#"sequenceDiagram
    participant P as Patient
    participant D as Database
    participant Doc as Doctor

    P->>D: Login
    D-->>P: Authentication
    P->>D: Upload Data
    P->>D: Edit Data
    P->>D: View Data
    P->>Doc: Share Access
    Doc->>D: Access Data"#;

const GANTT: &str = r#"gantt
    title Medical Data Management Project
    dateFormat  YYYY-MM-DD
    section Design
    Design database schema          :done, des1, 2024-01-01, 2024-01-10
    Create UI mockups               :active, des2, 2024-01-05, 2024-01-15
    section Development
    Backend development             :crit, dev1, 2024-01-10, 2024-02-01
    Frontend development            :dev2, 2024-01-15, 2024-02-15
    section Testing
    QA testing                      :test1, 2024-02-15, 2024-03-01
    User acceptance testing         :test2, 2024-03-01, 2024-03-15"#;

const CLASS: &str = r#"classDiagram
    class Patient {
        +String name
        +String email
        +String patientId
        +login()
        +uploadData()
        +editData()
        +viewData()
    }

    class Doctor {
        +String name
        +String email
        +String doctorId
        +accessPatientData()
    }

    class Database {
        +storeData()
        +retrieveData()
        +updateData()
        +deleteData()
    }

    Patient --> Database : uploads/edits
    Doctor --> Database : accesses
    Patient --> Doctor : shares access"#;

const STATE: &str = r#"stateDiagram-v2
    [*] --> LoggedOut
    LoggedOut --> LoggingIn : Enter credentials
    LoggingIn --> Authenticated : Valid credentials
    LoggingIn --> LoggedOut : Invalid credentials
    Authenticated --> Uploading : Upload data
    Authenticated --> Editing : Edit data
    Authenticated --> Viewing : View data
    Authenticated --> Sharing : Share with doctor
    Uploading --> Authenticated : Upload complete
    Editing --> Authenticated : Edit complete
    Viewing --> Authenticated : Finish viewing
    Sharing --> Authenticated : Sharing complete
    Authenticated --> LoggedOut : Logout"#;

const PIE: &str = r#"%%{init: {"pie": {"textPosition": 0.5}, "themeVariables": {"pieOuterStrokeWidth": "5px"}} }%%
pie title Patient Activities Distribution
    "Data Upload" : 25
    "Data Editing" : 20
    "Data Viewing" : 35
    "Doctor Sharing" : 15
    "Other" : 5"#;

const ER: &str = r#"erDiagram
    PATIENT ||--o{ MEDICAL_RECORD : has
    PATIENT ||--o{ ACCESS_PERMISSION : grants
    DOCTOR ||--o{ ACCESS_PERMISSION : receives
    MEDICAL_RECORD }|--|| DATABASE : stored_in

    PATIENT {
        string patientId
        string name
        string email
        date dateOfBirth
    }

    DOCTOR {
        string doctorId
        string name
        string email
        string specialization
    }

    MEDICAL_RECORD {
        string recordId
        string patientId
        date createdDate
        string data
    }"#;

const JOURNEY: &str = r#"journey
    title Patient Data Management Journey
    section Authentication
      Patient logs in : 5: Patient
    section Data Management
      Upload new data : 4: Patient
      Edit existing data : 3: Patient
      View data : 5: Patient
    section Sharing
      Share with doctor : 4: Patient
      Doctor accesses data : 5: Doctor"#;

const REQUIREMENT: &str = r#"requirementDiagram
    requirement data_privacy {
        id: 1
        text: patient data must stay private
        risk: high
        verifymethod: test
    }

    element patient_portal {
        type: application
    }

    patient_portal - satisfies -> data_privacy"#;

const GIT: &str = r#"gitGraph
    commit
    branch develop
    checkout develop
    commit
    commit
    checkout main
    merge develop
    commit"#;

const C4: &str = r#"C4Context
    title Patient Data System Context
    Person(patient, "Patient", "Manages personal medical data")
    Person(doctor, "Doctor", "Accesses shared records")
    System(portal, "Patient Portal", "Stores and shares medical data")
    Rel(patient, portal, "Uploads and edits data")
    Rel(doctor, portal, "Reads shared data")"#;
